use colored::{Color, ColoredString, Colorize};

use crate::testing::Verdict;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                Correct => Color::Green,
                Mismatch => Color::Red,
            };
        }

        match self {
            Correct => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Mismatch => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
        }
    }
}

/// `......correct`
pub fn correct_mark() -> ColoredString {
    format!("......{}", Verdict::Correct)
        .color(Verdict::Correct.color())
        .bold()
}

pub fn mismatch_title(fixture_name: &str, line: usize) -> ColoredString {
    format!("Test case mismatch: {} (line {})", fixture_name, line)
        .color(Verdict::Mismatch.color())
        .bold()
}

pub fn time_exceeded_notice() -> ColoredString {
    "time exceeded...".color(log::Level::Warn.color())
}

pub fn infinite_loop_warning() -> ColoredString {
    "Your code may have an infinite loop".color(log::Level::Warn.color())
}

pub fn summary(correct: usize, attempted: usize) -> ColoredString {
    let msg = format!("{} out of {} correct", correct, attempted);
    if correct == attempted {
        msg.green().bold()
    } else {
        msg.bright_red().bold()
    }
}

/// Separator shown between grading cycles.
pub fn separator(cols: usize) -> ColoredString {
    "=".repeat(cols).blue().bold()
}
