use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{ensure, Context as _};
use grader_core::{FixtureSet, Grader, Submission};

use super::{GlobalArgs, SubcmdResult};
use crate::config;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Directory holding the test case files
    pub dir: PathBuf,

    /// Program to grade
    pub program: PathBuf,

    /// Only run this test case (an input filename)
    #[arg(short = 't', long)]
    pub fixture: Option<String>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;

    let fixtures = FixtureSet::load(&args.dir, &cfg.fixture)?;
    let submission = Submission::from_file(&args.program)?;
    let grader = Grader::from_config(&cfg, &args.dir)?;

    // The scratch file is emptied after grading; never let it be the program itself.
    let scratch = grader.scratch().submission();
    let same_file = match (scratch.canonicalize(), args.program.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    ensure!(
        !same_file,
        "{} is the grader's scratch file; rename the program or change `scratch.submission`",
        args.program.to_string_lossy()
    );

    let mut stdout = io::stdout().lock();
    let session = grader
        .grade(&fixtures, args.fixture.as_deref(), &submission, &mut stdout)
        .await
        .context("Grading failed")?;
    stdout.flush()?;

    if !session.all_correct() {
        std::process::exit(1);
    }
    Ok(())
}
