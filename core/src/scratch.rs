use std::path::{Path, PathBuf};

use crate::config::ScratchConfig;
use crate::submission::Submission;

/// The two files reused by every run in a fixture directory:
/// the submitted source and the captured stdout of the latest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFiles {
    submission: PathBuf,
    output: PathBuf,
}

impl ScratchFiles {
    pub fn new(submission: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            submission: submission.into(),
            output: output.into(),
        }
    }

    pub fn in_dir(dir: impl AsRef<Path>, cfg: &ScratchConfig) -> Self {
        let dir = dir.as_ref();
        Self::new(
            fsutil::join_in_dir(dir, &cfg.submission),
            fsutil::join_in_dir(dir, &cfg.output),
        )
    }

    pub fn submission(&self) -> &Path {
        &self.submission
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub fn write_submission(&self, submission: &Submission) -> fsutil::Result<()> {
        fsutil::write(&self.submission, submission.text())
    }

    /// Empties both files, creating them if needed.
    #[must_use]
    pub fn truncate_all(&self) -> fsutil::Result<()> {
        fsutil::truncate(&self.submission)?;
        fsutil::truncate(&self.output)
    }
}

/// Empties the scratch files of each listed directory that holds a submission file.
/// Directories without one are left untouched. Returns the directories cleaned.
pub fn cleanup_known_dirs<P>(dirs: &[P], cfg: &ScratchConfig) -> Vec<PathBuf>
where
    P: AsRef<Path>,
{
    let mut cleaned = Vec::new();
    for dir in dirs {
        let scratch = ScratchFiles::in_dir(dir, cfg);
        if !scratch.submission().is_file() {
            continue;
        }
        match scratch.truncate_all() {
            Ok(()) => cleaned.push(dir.as_ref().to_owned()),
            Err(e) => log::warn!("Failed to clean up {:?}: {}", dir.as_ref(), e),
        }
    }
    cleaned
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paths_inside_fixture_dir() {
        let s = ScratchFiles::in_dir("Q1", &ScratchConfig::default());
        assert_eq!(s.submission(), Path::new("Q1/code.py"));
        assert_eq!(s.output(), Path::new("Q1/tmp"));
    }

    #[test]
    fn write_then_truncate() {
        let tmp = tempfile::tempdir().unwrap();
        let s = ScratchFiles::in_dir(tmp.path(), &ScratchConfig::default());

        s.write_submission(&Submission::new("print('a much longer program')\n"))
            .unwrap();
        s.write_submission(&Submission::new("print(1)\n")).unwrap();
        assert_eq!(fsutil::read_to_string(s.submission()).unwrap(), "print(1)\n");

        s.truncate_all().unwrap();
        assert_eq!(fsutil::read_to_string(s.submission()).unwrap(), "");
        assert_eq!(fsutil::read_to_string(s.output()).unwrap(), "");
    }

    #[test]
    fn cleanup_touches_only_listed_dirs_with_a_submission() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = ScratchConfig::default();
        let (q1, q2, unlisted) = (tmp.path().join("Q1"), tmp.path().join("Q2"), tmp.path().join("Q3"));
        for dir in [&q1, &q2, &unlisted] {
            fsutil::mkdir_all(dir).unwrap();
        }
        fsutil::write(q1.join("code.py"), "print(1)\n").unwrap();
        fsutil::write(q1.join("tmp"), "1\n").unwrap();
        fsutil::write(unlisted.join("code.py"), "print(3)\n").unwrap();

        let cleaned = cleanup_known_dirs(&[&q1, &q2, &tmp.path().join("missing")], &cfg);

        assert_eq!(cleaned, vec![q1.clone()]);
        assert_eq!(fsutil::read_to_string(q1.join("code.py")).unwrap(), "");
        assert_eq!(fsutil::read_to_string(q1.join("tmp")).unwrap(), "");
        assert!(!q2.join("code.py").exists());
        assert_eq!(fsutil::read_to_string(unlisted.join("code.py")).unwrap(), "print(3)\n");
    }
}
