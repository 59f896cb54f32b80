pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::io::Write;
use std::path::Path;

use error::*;

use crate::config::Config;
use crate::fixture::{Fixture, FixtureSet};
use crate::loop_check::LoopDetector;
use crate::scratch::ScratchFiles;
use crate::style;
use crate::submission::Submission;
use crate::testing::{
    compare_files, Comparison, FixtureOutcome, GradingSession, ProgramRunner, Verdict,
};

/// Runs a submission against the fixtures of one directory and reports as it goes.
#[derive(Debug, Clone)]
pub struct Grader {
    runner: ProgramRunner,
    scratch: ScratchFiles,
    detector: LoopDetector,
}

impl Grader {
    /// Columns added to the longest output filename for the `Checking <name>` column.
    pub const CHECKING_COLUMN_PAD: usize = 13;

    /// `runner` must already point at `scratch.submission()`.
    pub fn new(runner: ProgramRunner, scratch: ScratchFiles, detector: LoopDetector) -> Self {
        Self {
            runner,
            scratch,
            detector,
        }
    }

    pub fn from_config(cfg: &Config, fixture_dir: impl AsRef<Path>) -> Result<Self> {
        let scratch = ScratchFiles::in_dir(fixture_dir, &cfg.scratch);
        let runner = ProgramRunner::new(&cfg.run.command)
            .shell(&cfg.run.shell)
            .time_limit(cfg.run.time_limit_duration()?)
            .program_file(scratch.submission())
            .context("Invalid `run.command`")?;
        log::info!(
            "Run command: {} (shell: {:?}, time limit: {:?})",
            runner.get_command(),
            runner.get_shell(),
            runner.get_time_limit()
        );

        Ok(Self::new(runner, scratch, LoopDetector::from(&cfg.loop_check)))
    }

    pub fn runner(&self) -> &ProgramRunner {
        &self.runner
    }

    pub fn scratch(&self) -> &ScratchFiles {
        &self.scratch
    }

    /// One grading cycle: every fixture in sorted order, or only `selector` (an input
    /// filename). A mismatch never stops the remaining fixtures. Both scratch files are
    /// emptied afterwards, also when the cycle fails.
    pub async fn grade<W>(
        &self,
        fixtures: &FixtureSet,
        selector: Option<&str>,
        submission: &Submission,
        out: &mut W,
    ) -> Result<GradingSession>
    where
        W: Write,
    {
        let indices: Vec<usize> = match selector {
            Some(name) => vec![fixtures.select(name)?],
            None => (0..fixtures.len()).collect(),
        };

        let res = self.grade_fixtures(fixtures, &indices, submission, out).await;
        let cleanup = self.scratch.truncate_all();

        let session = res?;
        cleanup.context("Failed to clean up scratch files")?;
        Ok(session)
    }

    async fn grade_fixtures<W>(
        &self,
        fixtures: &FixtureSet,
        indices: &[usize],
        submission: &Submission,
        out: &mut W,
    ) -> Result<GradingSession>
    where
        W: Write,
    {
        self.scratch
            .write_submission(submission)
            .context("Failed to save submission")?;

        let width = Self::CHECKING_COLUMN_PAD + fixtures.max_output_name_len();
        let mut session = GradingSession::default();

        for fixture in indices.iter().filter_map(|&i| fixtures.get(i)) {
            let outcome = self.grade_one(&fixture, width, out).await?;
            log::debug!("{:?}", outcome);
            session.record(outcome.verdict);
        }

        if self.detector.scan(submission.text()).may_loop_forever() {
            writeln!(out, "\n{}", style::infinite_loop_warning())?;
        }
        writeln!(out, "\n{}", style::summary(session.correct, session.attempted))?;
        out.flush()?;

        Ok(session)
    }

    /// Runs and checks a single fixture, printing its status line.
    pub async fn grade_one<W>(
        &self,
        fixture: &Fixture,
        width: usize,
        out: &mut W,
    ) -> Result<FixtureOutcome>
    where
        W: Write,
    {
        let title = format!("Checking {}", fixture.expected_name());
        write!(out, "{:<width$}", title, width = width)?;
        out.flush()?;

        let run = self
            .runner
            .run(&fixture.input_path, self.scratch.output(), || {
                write!(out, "{}", style::time_exceeded_notice())
                    .and_then(|_| out.flush())
                    .unwrap_or_else(|e| log::warn!("Failed to print time notice: {}", e));
            })
            .await
            .with_context(|| format!("Failed to run test case {}", fixture.name))?;

        write!(out, "[time: {:.2}]", run.elapsed_secs())?;
        out.flush()?;

        let comparison = compare_files(&fixture.expected_path, self.scratch.output())?;
        let (verdict, mismatch) = match comparison {
            Comparison::Match => {
                writeln!(out, "{}", style::correct_mark())?;
                (Verdict::Correct, None)
            }
            Comparison::Mismatch(m) => {
                writeln!(out)?;
                writeln!(out, "{}", style::mismatch_title(&fixture.name, m.line))?;
                writeln!(out, "Your output    : {}", m.actual)?;
                writeln!(out, "Expected output: {}", m.expected)?;
                writeln!(out)?;
                (Verdict::Mismatch, Some(m))
            }
        };

        Ok(FixtureOutcome {
            fixture_name: fixture.name.to_owned(),
            verdict,
            elapsed_secs: run.elapsed_secs(),
            time_exceeded: run.time_exceeded,
            mismatch,
        })
    }
}
