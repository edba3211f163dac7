//! Read-only store of locally saved puzzle inputs

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Directory of puzzle inputs, one file per puzzle: `{dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path the input for a specific year/day is expected at
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Load the input for a specific year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing { year, day, path },
            _ => InputError::Read {
                path,
                source: Arc::new(source),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(store.path(2023, 1).ends_with("2023_day01.txt"));
        assert!(store.path(2023, 25).ends_with("2023_day25.txt"));
        assert!(store.path(2023, 1).starts_with(temp.path()));
    }

    #[test]
    fn test_read_saved_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 10));
        fs::write(store.path(2023, 10), "..F7.\n.FJ|.\n").unwrap();

        assert!(store.contains(2023, 10));
        assert_eq!(store.read(2023, 10).unwrap(), "..F7.\n.FJ|.\n");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().join("nowhere"));

        match store.read(2023, 21) {
            Err(InputError::Missing { year, day, path }) => {
                assert_eq!((year, day), (2023, 21));
                assert!(path.ends_with("2023_day21.txt"));
            }
            other => panic!("expected missing input, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir(store.path(2023, 14)).unwrap();

        assert!(!store.contains(2023, 14));
        assert!(matches!(store.read(2023, 14), Err(InputError::Read { .. })));
    }
}
