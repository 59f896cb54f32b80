use std::path::{Path, PathBuf};

use crate::config::FixtureConfig;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid folder name '{}'", .0.to_string_lossy())]
    InvalidDirectory(PathBuf, #[source] fsutil::Error),

    #[error("Missing test case files in folder '{}'", .0.to_string_lossy())]
    NoFixturesFound(PathBuf),

    #[error("Mismatch input and output file {input} {output}")]
    FixtureMismatch { input: String, output: String },

    #[error("Invalid test case '{0}'")]
    InvalidFixtureSelector(String),
}

/// Placeholder shown when an input fixture has no output at the same position.
pub const MISSING: &str = "<missing>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub name: String,
    pub input_path: PathBuf,
    pub expected_path: PathBuf,
}

/// Input and expected-output filenames of one directory, paired by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSet {
    dir: PathBuf,
    inputs: Vec<String>,
    outputs: Vec<String>,
    max_output_name_len: usize,
}

impl FixtureConfig {
    fn input_marker(&self) -> String {
        format!(".{}", self.input_ext)
    }

    fn output_marker(&self) -> String {
        format!(".{}", self.output_ext)
    }

    /// `s1.in` => `s1.out`
    pub fn expected_output_name(&self, input_name: &str) -> String {
        let stem = input_name
            .strip_suffix(&self.input_ext)
            .unwrap_or(input_name);
        format!("{}{}", stem, self.output_ext)
    }
}

impl FixtureSet {
    pub fn load(dir: impl AsRef<Path>, cfg: &FixtureConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let names =
            fsutil::file_names(dir).map_err(|e| Error::InvalidDirectory(dir.to_owned(), e))?;
        Self::from_names(dir, names, cfg)
    }

    pub fn from_names<I, S>(dir: impl Into<PathBuf>, names: I, cfg: &FixtureConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dir = dir.into();
        let (input_marker, output_marker) = (cfg.input_marker(), cfg.output_marker());

        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for name in names.into_iter().map(Into::into) {
            if name.contains(&input_marker) {
                inputs.push(name);
            } else if name.contains(&output_marker) {
                outputs.push(name);
            }
        }
        inputs.sort();
        outputs.sort();

        if inputs.is_empty() {
            return Err(Error::NoFixturesFound(dir));
        }

        for (i, input) in inputs.iter().enumerate() {
            let output = outputs.get(i).map(String::as_str);
            if output != Some(cfg.expected_output_name(input).as_str()) {
                return Err(Error::FixtureMismatch {
                    input: input.to_owned(),
                    output: output.unwrap_or(MISSING).to_owned(),
                });
            }
        }
        if let Some(extra) = outputs.get(inputs.len()) {
            return Err(Error::FixtureMismatch {
                input: MISSING.to_owned(),
                output: extra.to_owned(),
            });
        }

        let max_output_name_len = outputs.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        log::debug!("{} fixtures in {:?}", inputs.len(), dir);

        Ok(Self {
            dir,
            inputs,
            outputs,
            max_output_name_len,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn max_output_name_len(&self) -> usize {
        self.max_output_name_len
    }

    /// Resolves a single-fixture selector (an input filename) to its position.
    pub fn select(&self, input_name: &str) -> Result<usize> {
        self.inputs
            .iter()
            .position(|name| name == input_name)
            .ok_or_else(|| Error::InvalidFixtureSelector(input_name.to_owned()))
    }

    pub fn get(&self, index: usize) -> Option<Fixture> {
        let input = self.inputs.get(index)?;
        let output = &self.outputs[index];
        Some(Fixture {
            name: input.to_owned(),
            input_path: fsutil::join_in_dir(&self.dir, input),
            expected_path: fsutil::join_in_dir(&self.dir, output),
        })
    }

    pub fn fixtures(&self) -> impl Iterator<Item = Fixture> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

impl Fixture {
    pub fn expected_name(&self) -> String {
        self.expected_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cfg() -> FixtureConfig {
        FixtureConfig::default()
    }

    #[test]
    fn pairs_inputs_and_outputs_by_sorted_position() {
        let names = ["s2.out", "s1.in", "code.py", "s2.in", "tmp", "s1.out", "s10.in", "s10.out"];
        let set = FixtureSet::from_names("Q1", names, &cfg()).unwrap();

        assert_eq!(set.inputs(), ["s1.in", "s10.in", "s2.in"]);
        assert_eq!(set.outputs(), ["s1.out", "s10.out", "s2.out"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        for (input, output) in set.inputs().iter().zip(set.outputs()) {
            assert_eq!(&cfg().expected_output_name(input), output);
        }
        assert_eq!(set.max_output_name_len(), "s10.out".len());
    }

    #[test]
    fn fixtures_carry_paths_inside_dir() {
        let set = FixtureSet::from_names("Q1", ["a.in", "a.out"], &cfg()).unwrap();
        let all: Vec<_> = set.fixtures().collect();
        assert_eq!(
            all,
            vec![Fixture {
                name: "a.in".to_owned(),
                input_path: PathBuf::from("Q1/a.in"),
                expected_path: PathBuf::from("Q1/a.out"),
            }]
        );
        assert_eq!(all[0].expected_name(), "a.out");
    }

    #[test]
    fn no_inputs_is_an_error() {
        let err = FixtureSet::from_names("Q1", ["a.out", "notes.txt"], &cfg()).unwrap_err();
        assert!(matches!(err, Error::NoFixturesFound(dir) if dir == Path::new("Q1")));
    }

    #[test]
    fn misnamed_pair_is_reported() {
        let err = FixtureSet::from_names("Q1", ["a.in", "b.out"], &cfg()).unwrap_err();
        match err {
            Error::FixtureMismatch { input, output } => {
                assert_eq!(input, "a.in");
                assert_eq!(output, "b.out");
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn missing_output_is_reported() {
        let err = FixtureSet::from_names("Q1", ["a.in", "a.out", "b.in"], &cfg()).unwrap_err();
        match err {
            Error::FixtureMismatch { input, output } => {
                assert_eq!(input, "b.in");
                assert_eq!(output, MISSING);
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn extra_output_is_reported() {
        let err = FixtureSet::from_names("Q1", ["a.in", "a.out", "b.out"], &cfg()).unwrap_err();
        assert!(matches!(err, Error::FixtureMismatch { output, .. } if output == "b.out"));
    }

    #[test]
    fn custom_extensions() {
        let cfg = FixtureConfig {
            input_ext: "input".to_owned(),
            output_ext: "answer".to_owned(),
        };
        let set = FixtureSet::from_names("Q1", ["1.answer", "1.input"], &cfg).unwrap();
        assert_eq!(set.outputs(), ["1.answer"]);
    }

    #[test]
    fn select_by_input_name() {
        let set =
            FixtureSet::from_names("Q1", ["s1.in", "s1.out", "s2.in", "s2.out"], &cfg()).unwrap();
        assert_eq!(set.select("s2.in").unwrap(), 1);
        assert!(matches!(
            set.select("s3.in"),
            Err(Error::InvalidFixtureSelector(name)) if name == "s3.in"
        ));
    }

    #[test]
    fn load_from_directory() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["s1.in", "s1.out", "s2.in", "s2.out"] {
            fsutil::write(tmp.path().join(name), "").unwrap();
        }
        fsutil::mkdir_all(tmp.path().join("old.in")).unwrap();

        let set = FixtureSet::load(tmp.path(), &cfg()).unwrap();
        assert_eq!(set.inputs(), ["s1.in", "s2.in"]);
        assert_eq!(set.dir(), tmp.path());
    }

    #[test]
    fn load_from_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = FixtureSet::load(tmp.path().join("Q9"), &cfg()).unwrap_err();
        assert!(matches!(err, Error::InvalidDirectory(..)));
    }
}
