use std::{
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::Context as _;

use super::result::LineMismatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch(LineMismatch),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match)
    }
}

/// Reads one line with its trailing whitespace stripped.
/// Past end-of-stream it keeps yielding `""`.
fn next_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<String> {
    buf.clear();
    reader.read_until(b'\n', buf)?;
    Ok(String::from_utf8_lossy(buf).trim_end().to_owned())
}

/// Compares line by line, ignoring trailing whitespace of each line.
///
/// A stream that has ended reads as empty lines. The comparison stops with a match
/// at the first line that is blank on both sides, so anything after a shared blank
/// line is not looked at.
pub fn compare_readers<E, A>(mut expected: E, mut actual: A) -> io::Result<Comparison>
where
    E: BufRead,
    A: BufRead,
{
    let mut expected_buf = Vec::new();
    let mut actual_buf = Vec::new();

    for line in 1.. {
        let want = next_line(&mut expected, &mut expected_buf)?;
        let got = next_line(&mut actual, &mut actual_buf)?;
        if want != got {
            return Ok(Comparison::Mismatch(LineMismatch {
                line,
                actual: got,
                expected: want,
            }));
        }
        if want.is_empty() {
            break;
        }
    }
    Ok(Comparison::Match)
}

pub fn compare_files(
    expected_path: impl AsRef<Path>,
    actual_path: impl AsRef<Path>,
) -> anyhow::Result<Comparison> {
    let expected = fsutil::open_file(&expected_path)?;
    let actual = fsutil::open_file(&actual_path)?;
    compare_readers(BufReader::new(expected), BufReader::new(actual)).with_context(|| {
        format!(
            "Failed to compare {} with {}",
            actual_path.as_ref().to_string_lossy(),
            expected_path.as_ref().to_string_lossy(),
        )
    })
}
