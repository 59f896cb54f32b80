use std::{
    collections::HashMap,
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use anyhow::Context;
use tokio::process::Command;

use super::result::RunOutcome;
use crate::str_interp::{interp, InterpError};

/// Runs a submitted program with a fixture on stdin and a scratch file as stdout.
#[derive(Debug, Clone)]
pub struct ProgramRunner {
    command: String,
    shell: PathBuf,
    time_limit: Duration,
}

impl ProgramRunner {
    pub const DEFAULT_SHELL: &str = "/bin/sh";
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: Self::DEFAULT_SHELL.into(),
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Fills `#{filePath}`, `#{fileName}`, `#{fileDir}`, `#{fileStem}` and `#{fileExt}`
    /// in the command from the location of the program source.
    pub fn program_file(
        mut self,
        filepath: impl AsRef<Path>,
    ) -> std::result::Result<Self, InterpError> {
        let vars = Self::make_cmd_interp_vars(filepath.as_ref());
        self.command = interp(&self.command, &vars)?;
        Ok(self)
    }

    fn make_cmd_interp_vars(filepath: &Path) -> HashMap<&'static str, &OsStr> {
        let mut m: HashMap<_, &OsStr> = HashMap::new();
        m.insert("filePath", filepath.as_ref());
        m.insert(
            "fileName",
            filepath.file_name().unwrap_or(OsStr::new("UNDEFINED_FILE_NAME")),
        );
        m.insert(
            "fileDir",
            filepath
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .as_os_str(),
        );
        m.insert(
            "fileStem",
            filepath
                .file_stem()
                .unwrap_or(OsStr::new("UNDEFINED_FILE_STEM")),
        );
        m.insert(
            "fileExt",
            filepath
                .extension()
                .unwrap_or(OsStr::new("UNDEFINED_FILE_EXTENSION")),
        );
        m
    }

    pub fn get_shell(&self) -> &Path {
        &self.shell
    }

    pub fn get_command(&self) -> &str {
        &self.command
    }

    pub fn get_time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Runs the program once, blocking until it exits on its own.
    ///
    /// If it is still running when the time limit passes, `on_time_exceeded` is called
    /// once and the wait goes on. The process is never killed.
    /// `output` is truncated before the run, so nothing from a previous run survives.
    pub async fn run<F>(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        mut on_time_exceeded: F,
    ) -> anyhow::Result<RunOutcome>
    where
        F: FnMut(),
    {
        let stdin = fsutil::open_file(&input).context("Failed to open input fixture")?;
        let stdout = fsutil::create_file(&output).context("Failed to prepare output file")?;

        let cmd = &self.command;
        let start_at = tokio::time::Instant::now();
        let mut proc = Command::new(&self.shell)
            .args(["-c", cmd.as_str()])
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn '{} -c {}'",
                    self.shell.to_string_lossy(),
                    cmd
                )
            })?;

        let deadline = tokio::time::sleep(self.time_limit);
        tokio::pin!(deadline);

        let mut time_exceeded = false;
        let status = loop {
            tokio::select! {
                status = proc.wait() => {
                    break status.context("Failed to wait for subprocess")?;
                }
                _ = &mut deadline, if !time_exceeded => {
                    time_exceeded = true;
                    log::debug!("Time limit {:?} exceeded; still waiting", self.time_limit);
                    on_time_exceeded();
                }
            }
        };
        let elapsed = tokio::time::Instant::now().duration_since(start_at);

        if !status.success() {
            match status.code() {
                Some(code) => log::warn!("Program exited with code {}", code),
                None => log::warn!("Program terminated by signal"),
            }
        }

        Ok(RunOutcome {
            elapsed,
            time_exceeded,
            status,
        })
    }
}
