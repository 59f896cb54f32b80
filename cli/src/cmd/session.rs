use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use colored::Colorize as _;
use grader_core::{
    config::Config,
    fixture::{self, FixtureSet},
    scratch, style, Grader, Submission,
};

use super::{intro, GlobalArgs, SubcmdResult};
use crate::{config, interactive, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Fixture directories whose leftover scratch files are emptied at startup
    /// (in addition to `session.known_dirs`)
    pub dirs: Vec<PathBuf>,

    /// Do not print the introduction
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;

    let known_dirs: Vec<&Path> = cfg
        .session
        .known_dirs
        .iter()
        .chain(&args.dirs)
        .map(PathBuf::as_path)
        .collect();
    for dir in scratch::cleanup_known_dirs(&known_dirs, &cfg.scratch) {
        log::info!("Cleaned up scratch files in {:?}", dir);
    }

    if !args.quiet {
        println!("{}", intro::intro_text(&cfg.fixture));
    }

    let fixtures = ask_fixture_set(&cfg)?;
    let selector = ask_fixture_selector(&fixtures)?;
    let grader = Grader::from_config(&cfg, fixtures.dir())?;
    grader.scratch().truncate_all()?;

    loop {
        println!("\nPaste codes below and hit enter:\n");
        let submission = Submission::read_pasted(io::stdin().lock())?;
        if submission.is_empty() {
            // Leading blank lines are skipped, so an empty paste means stdin is closed.
            log::info!("No more input");
            break;
        }
        println!("{}", "- submitted -".bright_black());

        let mut stdout = io::stdout().lock();
        if let Err(e) = grader
            .grade(&fixtures, selector.as_deref(), &submission, &mut stdout)
            .await
        {
            eprintln!("\n{}", format!("Error: {:#}", e).bright_red());
        }
        stdout.flush()?;
        drop(stdout);

        println!("\n{}", style::separator(util::separator_width()));
        if !interactive::confirm("Re-run test?")? {
            break;
        }
    }
    Ok(())
}

fn ask_fixture_set(cfg: &Config) -> anyhow::Result<FixtureSet> {
    loop {
        let name = interactive::ask_text("Enter folder name")?;
        match load_fixture_dir(name.trim(), cfg) {
            Ok(fixtures) => {
                log::info!("Fixture dir: {:?}", fixtures.dir());
                return Ok(fixtures);
            }
            Err(e) => eprintln!("{}", e.to_string().bright_red()),
        }
    }
}

/// Tries the name as typed, then with its last component upper-cased (`q1` finds `Q1`).
pub fn load_fixture_dir(name: &str, cfg: &Config) -> fixture::Result<FixtureSet> {
    match FixtureSet::load(name, &cfg.fixture) {
        Err(fixture::Error::InvalidDirectory(dir, e)) => {
            let upper = dir
                .file_name()
                .map(|s| dir.with_file_name(s.to_string_lossy().to_uppercase()))
                .filter(|upper| upper != &dir);
            match upper {
                Some(upper) => FixtureSet::load(upper, &cfg.fixture),
                None => Err(fixture::Error::InvalidDirectory(dir, e)),
            }
        }
        res => res,
    }
}

fn ask_fixture_selector(fixtures: &FixtureSet) -> anyhow::Result<Option<String>> {
    loop {
        let Some(name) =
            interactive::ask_optional_text("Enter test case file [or hit enter to test all]")?
        else {
            return Ok(None)
        };
        match fixtures.select(&name) {
            Ok(_) => return Ok(Some(name)),
            Err(e) => eprintln!("{}", e.to_string().bright_red()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn folder_name_falls_back_to_upper_case() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("Q1");
        fsutil::mkdir_all(&dir).unwrap();
        fsutil::write(dir.join("s1.in"), "").unwrap();
        fsutil::write(dir.join("s1.out"), "").unwrap();
        let cfg = Config::default();

        let typed = tmp.path().join("q1");
        let fixtures = load_fixture_dir(typed.to_str().unwrap(), &cfg).unwrap();
        assert_eq!(fixtures.inputs(), ["s1.in"]);

        let fixtures = load_fixture_dir(dir.to_str().unwrap(), &cfg).unwrap();
        assert_eq!(fixtures.dir(), dir);
    }

    #[test]
    fn missing_folder_is_invalid_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("NOPE");
        let err = load_fixture_dir(missing.to_str().unwrap(), &Config::default()).unwrap_err();
        assert!(matches!(err, fixture::Error::InvalidDirectory(..)));
    }
}
