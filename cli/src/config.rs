use std::path::PathBuf;

use anyhow::Context as _;
use grader_core::Config;

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "grader";

/// `~/.config/grader` on Linux.
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Config from `--config`, else the nearest `grader.toml`, else the user config dir,
/// else the defaults. Command-line flags win over file values.
pub fn load(args: &GlobalArgs) -> anyhow::Result<Config> {
    let cfg = match &args.config {
        Some(path) => Config::from_toml_file(path.clone()),
        None => Config::discover(util::current_dir(), user_config_dir().as_deref()),
    };
    let cfg = cfg.context("Failed to load config")?;
    with_args(cfg, args)
}

pub fn with_args(mut cfg: Config, args: &GlobalArgs) -> anyhow::Result<Config> {
    let GlobalArgs {
        subcmd: _,
        config: _,
        time_limit,
    } = args;

    if let Some(secs) = time_limit {
        cfg.run.time_limit = *secs;
    }
    cfg.validate()?;
    Ok(cfg)
}
