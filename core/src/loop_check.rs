//! Textual check for loops that can only end through `break`.
//!
//! This only counts lines, it does not look at control flow: a `break` inside an
//! unrelated branch cancels a loop, and so does a loop whose `break` sits on the same
//! line. The result is a hint printed to the user, never a verdict.

use crate::config::LoopCheckConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopDetector {
    loop_pattern: String,
    break_pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopScan {
    /// Lines opening an unconditional loop minus lines containing a break.
    pub balance: i64,
}

impl LoopScan {
    pub fn may_loop_forever(&self) -> bool {
        self.balance > 0
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl LoopDetector {
    pub const DEFAULT_LOOP_PATTERN: &str = "whileTrue:";
    pub const DEFAULT_BREAK_PATTERN: &str = "break";

    /// Whitespace in the patterns is dropped, as it is from the scanned lines.
    pub fn new(loop_pattern: &str, break_pattern: &str) -> Self {
        Self {
            loop_pattern: strip_whitespace(loop_pattern),
            break_pattern: strip_whitespace(break_pattern),
        }
    }

    pub fn scan(&self, source: &str) -> LoopScan {
        let mut balance = 0;
        for line in source.lines().map(strip_whitespace) {
            if !self.loop_pattern.is_empty() && line.contains(&self.loop_pattern) {
                balance += 1;
            }
            if !self.break_pattern.is_empty() && line.contains(&self.break_pattern) {
                balance -= 1;
            }
        }
        LoopScan { balance }
    }
}

impl Default for LoopDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOOP_PATTERN, Self::DEFAULT_BREAK_PATTERN)
    }
}

impl From<&LoopCheckConfig> for LoopDetector {
    fn from(cfg: &LoopCheckConfig) -> Self {
        Self::new(&cfg.loop_pattern, &cfg.break_pattern)
    }
}
