use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::loop_check::LoopDetector;
use crate::testing::runner::ProgramRunner;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub fixture: FixtureConfig,
    pub run: RunConfig,
    pub scratch: ScratchConfig,
    pub loop_check: LoopCheckConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub input_ext: String,
    pub output_ext: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub shell: PathBuf,
    pub command: String,
    /// Advisory limit in seconds.
    pub time_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    pub submission: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoopCheckConfig {
    pub loop_pattern: String,
    pub break_pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub known_dirs: Vec<PathBuf>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            input_ext: "in".to_owned(),
            output_ext: "out".to_owned(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shell: ProgramRunner::DEFAULT_SHELL.into(),
            command: r##"python3 "#{filePath}""##.to_owned(),
            time_limit: ProgramRunner::DEFAULT_TIME_LIMIT.as_secs_f64(),
        }
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            submission: "code.py".to_owned(),
            output: "tmp".to_owned(),
        }
    }
}

impl Default for LoopCheckConfig {
    fn default() -> Self {
        Self {
            loop_pattern: LoopDetector::DEFAULT_LOOP_PATTERN.to_owned(),
            break_pattern: LoopDetector::DEFAULT_BREAK_PATTERN.to_owned(),
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "grader.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).expect("example config is embedded at build time");
        String::from_utf8_lossy(file.data.as_ref()).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Looks up `grader.toml` in `cur_dir` and its ancestors, then in `user_config_dir`.
    /// Falls back to the built-in defaults if none exists.
    pub fn discover(
        cur_dir: impl AsRef<Path>,
        user_config_dir: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let found = Self::find_file_in_ancestors(cur_dir).or_else(|| {
            user_config_dir
                .map(|dir| dir.join(Self::FILENAME))
                .filter(|path| path.is_file())
        });
        match found {
            Some(path) => {
                log::info!("Using config {:?}", path);
                Self::from_toml_file(path)
            }
            None => {
                log::info!("No {} found; using defaults", Self::FILENAME);
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.fixture.input_ext.is_empty() && !self.fixture.output_ext.is_empty(),
            "`fixture.input_ext` and `fixture.output_ext` must not be empty"
        );
        ensure!(
            self.fixture.input_ext != self.fixture.output_ext,
            "`fixture.input_ext` and `fixture.output_ext` must differ"
        );
        ensure!(
            !self.scratch.submission.is_empty() && !self.scratch.output.is_empty(),
            "`scratch.submission` and `scratch.output` must not be empty"
        );
        self.run.time_limit_duration()?;
        Ok(())
    }
}

impl RunConfig {
    pub fn time_limit_duration(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.time_limit)
            .with_context(|| format!("Invalid `run.time_limit`: {}", self.time_limit))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            fixture,
            run,
            scratch,
            loop_check,
            session,
        } = cfg.clone();

        assert_eq!(source_config_file, None);
        assert_eq!(fixture.input_ext, "in");
        assert_eq!(fixture.output_ext, "out");
        assert_eq!(run.shell, Path::new("/bin/sh"));
        assert_eq!(run.command, r##"python3 "#{filePath}""##);
        assert_eq!(run.time_limit_duration().unwrap(), Duration::from_secs(10));
        assert_eq!(scratch.submission, "code.py");
        assert_eq!(scratch.output, "tmp");
        assert_eq!(loop_check.loop_pattern, "whileTrue:");
        assert_eq!(loop_check.break_pattern, "break");
        assert!(session.known_dirs.is_empty());

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml(
            r#"
            [run]
            time_limit = 2.5

            [session]
            known_dirs = ["Q1", "Q2"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.run.time_limit_duration().unwrap(), Duration::from_millis(2500));
        assert_eq!(cfg.run.shell, Path::new("/bin/sh"));
        assert_eq!(cfg.fixture, FixtureConfig::default());
        assert_eq!(cfg.session.known_dirs, vec![PathBuf::from("Q1"), PathBuf::from("Q2")]);
    }

    #[test]
    fn negative_time_limit_is_rejected() {
        let mut cfg = Config::default();
        cfg.run.time_limit = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn same_extensions_are_rejected() {
        let mut cfg = Config::default();
        cfg.fixture.output_ext = "in".to_owned();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn discover_finds_config_in_ancestor() {
        let tmp = tempfile::tempdir().unwrap();
        fsutil::write(
            tmp.path().join(Config::FILENAME),
            "[loop_check]\nloop_pattern = \"loop{\"\n",
        )
        .unwrap();
        let nested = tmp.path().join("Q1");
        fsutil::mkdir_all(&nested).unwrap();

        let cfg = Config::discover(&nested, None).unwrap();
        assert_eq!(cfg.loop_check.loop_pattern, "loop{");
        assert_eq!(
            cfg.source_config_file.as_deref(),
            Some(tmp.path().join(Config::FILENAME).as_path())
        );
    }
}
