use std::{process::ExitStatus, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Verdict {
    #[strum(serialize = "correct")]
    Correct,
    #[strum(serialize = "mismatch")]
    Mismatch,
}

/// What the child process did, before its output is compared.
#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub elapsed: Duration,
    /// The advisory time limit was crossed. The process still ran to completion.
    pub time_exceeded: bool,
    pub status: ExitStatus,
}

impl RunOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        round_secs(self.elapsed)
    }
}

/// Seconds rounded to two decimal places.
pub fn round_secs(d: Duration) -> f64 {
    (d.as_secs_f64() * 100.0).round() / 100.0
}

/// First pair of lines that differ after trailing whitespace is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// 1-based
    pub line: usize,
    pub actual: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureOutcome {
    pub fixture_name: String,
    pub verdict: Verdict,
    pub elapsed_secs: f64,
    pub time_exceeded: bool,
    pub mismatch: Option<LineMismatch>,
}

/// Counters of one grading cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradingSession {
    pub attempted: usize,
    pub correct: usize,
}

impl GradingSession {
    pub fn record(&mut self, verdict: Verdict) {
        self.attempted += 1;
        if verdict == Verdict::Correct {
            self.correct += 1;
        }
    }

    pub fn all_correct(&self) -> bool {
        self.correct == self.attempted
    }
}
