use anyhow::ensure;
use grader_core::{print_success, Config};
use std::path::PathBuf;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,

    /// Overwrite an existing grader.toml
    #[arg(short, long)]
    force: bool,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let path = args.dir.join(Config::FILENAME);
    ensure!(
        args.force || !path.exists(),
        "{} already exists (use --force to overwrite)",
        path.to_string_lossy()
    );
    fsutil::write_with_mkdir(&path, Config::example_toml())?;
    print_success!(
        "Successfully wrote {}",
        util::replace_homedir_to_tilde(&path).to_string_lossy()
    );
    Ok(())
}
