pub mod config;
pub mod fixture;
pub mod grading;
pub mod loop_check;
pub mod scratch;
pub mod str_interp;
pub mod style;
pub mod submission;
pub mod testing;

pub use crate::config::Config;
pub use crate::fixture::{Fixture, FixtureSet};
pub use crate::grading::Grader;
pub use crate::submission::Submission;
