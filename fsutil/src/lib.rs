use std::{
    fs::{self, File, ReadDir},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Not a directory: '{0}'")]
        NotADirectory(PathBuf),
    }

    impl Error {
        pub fn path(&self) -> &std::path::Path {
            match self {
                Error::SingleIO(_, path, _) | Error::NotADirectory(path) => path,
            }
        }
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

/// Overwrite the file with empty contents, creating it if missing.
#[must_use]
pub fn truncate(filepath: impl AsRef<Path>) -> Result<()> {
    log::debug!("truncate {:?}", filepath.as_ref());
    self::write(filepath, b"")
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn open_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot open file", filepath.as_ref().to_owned(), e))
}

/// Create the file, or truncate it if it already exists.
#[must_use]
pub fn create_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::create(&filepath)
        .map_err(|e| Error::SingleIO("Cannot create file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

/// Names of the regular (non-directory) entries directly under `dir`, in no particular order.
/// Entries whose name is not valid UTF-8 are skipped.
pub fn file_names(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_owned()));
    }

    let mut names = Vec::new();
    for entry in self::read_dir(dir)?.filter_map(std::result::Result::ok) {
        let Ok(ft) = entry.file_type() else {
            continue
        };
        if ft.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => log::warn!("Skipped non UTF-8 filename {:?} in {:?}", name, dir),
        }
    }
    Ok(names)
}

/// Join `dir` and `name`, treating an empty `dir` as the current dir.
pub fn join_in_dir(dir: impl AsRef<Path>, name: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    if dir.as_os_str().is_empty() {
        PathBuf::from(".").join(name)
    } else {
        dir.join(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_names_skips_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path().join("a.in"), "1\n").unwrap();
        write(tmp.path().join("a.out"), "1\n").unwrap();
        mkdir_all(tmp.path().join("nested.in")).unwrap();

        let mut names = file_names(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.in", "a.out"]);
    }

    #[test]
    fn file_names_rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain");
        write(&file, "").unwrap();

        let err = file_names(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
        assert_eq!(err.path(), file);
    }

    #[test]
    fn truncate_overwrites_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("scratch");
        write(&file, "leftover output\n").unwrap();

        truncate(&file).unwrap();
        assert_eq!(read_to_string(&file).unwrap(), "");
    }

    #[test]
    fn join_in_dir_handles_empty_dir() {
        assert_eq!(join_in_dir("", "x.in"), Path::new("./x.in"));
        assert_eq!(join_in_dir("Q1", "x.in"), Path::new("Q1/x.in"));
    }
}
