use grader_core::{config::FixtureConfig, submission::Submission};

use super::{GlobalArgs, SubcmdResult};
use crate::config;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    println!("{}", intro_text(&cfg.fixture));
    Ok(())
}

pub fn intro_text(cfg: &FixtureConfig) -> String {
    let FixtureConfig {
        input_ext,
        output_ext,
    } = cfg;
    let max_blank = Submission::TERMINATING_BLANK_LINES - 1;
    format!(
        r#"
=======================================================

Before running the grader:
1) A folder with all the test cases must be created for each question
2) All test case input files must end with extension ".{input_ext}"
3) All test case output files must end with extension ".{output_ext}"
4) Each test case input file must have a corresponding output file
   with the same name (eg. s1.1.{input_ext} and s1.1.{output_ext})
5) Programs should not have more than {max_blank} consecutive blank lines;
   {terminator} blank lines in a row end the pasted program
6) When a single test case is picked, only that one is run and the
   summary reads "<correct> out of 1""#,
        terminator = Submission::TERMINATING_BLANK_LINES,
    )
}
