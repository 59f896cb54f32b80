use std::{io::BufRead, path::Path};

use anyhow::Context as _;

/// Program text handed in for one grading cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    text: String,
}

impl Submission {
    /// Consecutive blank lines that end a pasted program.
    pub const TERMINATING_BLANK_LINES: usize = 3;

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = fsutil::read_to_string(&path).context("Cannot read program file")?;
        Ok(Self::new(text))
    }

    /// Reads pasted lines until three consecutive blank lines or end of input.
    /// Blank lines before the first non-blank line are skipped; the terminating blank
    /// lines are not part of the submission.
    pub fn read_pasted(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut lines: Vec<String> = Vec::new();
        let mut blank_run = 0;

        for line in reader.lines() {
            let line = line.context("Failed to read pasted program")?;
            let line = line.trim_end_matches('\r').to_owned();
            let is_blank = line.trim().is_empty();

            if lines.is_empty() && is_blank {
                continue;
            }
            if is_blank {
                blank_run += 1;
                if blank_run >= Self::TERMINATING_BLANK_LINES {
                    break;
                }
            } else {
                blank_run = 0;
            }
            lines.push(line);
        }

        while lines.last().map_or(false, |l| l.trim().is_empty()) {
            lines.pop();
        }

        let mut text = lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
