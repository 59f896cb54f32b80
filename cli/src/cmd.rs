pub mod check;
pub mod init;
pub mod intro;
pub mod session;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Config file to use instead of searching for grader.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Advisory time limit per test case, in seconds
    #[arg(long, global = true)]
    pub time_limit: Option<f64>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("s"))]
    Session(session::Args),

    #[command(alias("c"))]
    Check(check::Args),

    Init(init::Args),
    Intro(intro::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Session(args) => session::exec(args, self).await,
            Check(args) => check::exec(args, self).await,
            Init(args) => init::exec(args, self),
            Intro(args) => intro::exec(args, self),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn parses_check_with_aliases_and_globals() {
        let args = GlobalArgs::try_parse_from([
            "grader", "c", "Q1", "Q1/main.py", "-t", "s1.in", "--time-limit", "2.5",
        ])
        .unwrap();
        assert_eq!(args.time_limit, Some(2.5));
        match args.subcmd {
            Subcommand::Check(check) => {
                assert_eq!(check.dir, PathBuf::from("Q1"));
                assert_eq!(check.program, PathBuf::from("Q1/main.py"));
                assert_eq!(check.fixture.as_deref(), Some("s1.in"));
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn parses_session_known_dirs() {
        let args = GlobalArgs::try_parse_from(["grader", "session", "-q", "Q1", "Q2"]).unwrap();
        match args.subcmd {
            Subcommand::Session(s) => {
                assert!(s.quiet);
                assert_eq!(s.dirs, vec![PathBuf::from("Q1"), PathBuf::from("Q2")]);
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }
}
