//! Puzzle inputs and expected answers stored on disk
//!
//! Directory structure:
//! - `{dir}/{year}/day{DD}.txt` holds the puzzle input
//! - `{dir}/{year}/day{DD}.answers` holds one expected answer per line, line N
//!   for part N; an empty line means the answer is not known yet

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the input file for a year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(year.to_string()).join(format!("day{day:02}.txt"))
    }

    /// Path of the answers file for a year/day
    pub fn answers_path(&self, year: u16, day: u8) -> PathBuf {
        self.input_path(year, day).with_extension("answers")
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn read_input(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        debug!(path = %path.display(), "loading input");
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Io { path, source },
        })
    }

    /// Expected answers indexed by `part - 1`; a missing file means none are known
    pub fn read_answers(&self, year: u16, day: u8) -> Result<Vec<Option<String>>, InputError> {
        let path = self.answers_path(year, day);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text
                .lines()
                .map(str::trim)
                .map(|l| (!l.is_empty()).then(|| l.to_string()))
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(InputError::Io { path, source }),
        }
    }

    /// Merge `answers` (part, answer) into the answers file, keeping other parts
    pub fn record_answers(
        &self,
        year: u16,
        day: u8,
        answers: &[(u8, &str)],
    ) -> Result<(), InputError> {
        let mut lines = self.read_answers(year, day)?;
        for &(part, answer) in answers {
            let idx = usize::from(part.saturating_sub(1));
            if lines.len() <= idx {
                lines.resize(idx + 1, None);
            }
            lines[idx] = Some(answer.to_string());
        }

        let path = self.answers_path(year, day);
        let io_err = |source| InputError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut text = lines
            .iter()
            .map(|l| l.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        fs::write(&path, text).map_err(io_err)?;
        debug!(path = %path.display(), parts = answers.len(), "recorded answers");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.input_path(2024, 1), PathBuf::from("inputs/2024/day01.txt"));
        assert_eq!(
            store.answers_path(2023, 25),
            PathBuf::from("inputs/2023/day25.answers")
        );
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        assert!(!store.contains(2024, 1));
        assert!(matches!(store.read_input(2024, 1), Err(InputError::Missing(_))));
        assert!(store.read_answers(2024, 1).unwrap().is_empty());
    }

    #[test]
    fn test_read_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(temp.path().join("2024")).unwrap();
        fs::write(store.input_path(2024, 1), "3   4\n4   3\n").unwrap();

        assert!(store.contains(2024, 1));
        assert_eq!(store.read_input(2024, 1).unwrap(), "3   4\n4   3\n");
    }

    #[test]
    fn test_answers_with_gaps() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(temp.path().join("2023")).unwrap();
        fs::write(store.answers_path(2023, 7), "\n5905\n").unwrap();

        assert_eq!(
            store.read_answers(2023, 7).unwrap(),
            vec![None, Some("5905".to_string())]
        );
    }

    #[test]
    fn test_record_merges_parts() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        store.record_answers(2025, 3, &[(2, "3121910778619")]).unwrap();
        assert_eq!(
            fs::read_to_string(store.answers_path(2025, 3)).unwrap(),
            "\n3121910778619\n"
        );

        store.record_answers(2025, 3, &[(1, "357")]).unwrap();
        assert_eq!(
            store.read_answers(2025, 3).unwrap(),
            vec![Some("357".to_string()), Some("3121910778619".to_string())]
        );
    }
}
