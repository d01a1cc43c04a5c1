use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

const APP_DIR_NAME: &str = "snake-levels";
const SCORE_FILE_NAME: &str = "scores.json";

/// Persistence for the single best score.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, ScoreError>;
    fn save(&self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// High score kept as JSON in the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct score file path.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    /// Returns `Ok(0)` when the score file does not yet exist (first run).
    fn load(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn save(&self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

/// Process-local store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    high_score: Cell<u32>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_score(score: u32) -> Self {
        Self {
            high_score: Cell::new(score),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.high_score.get())
    }

    fn save(&self, score: u32) -> Result<(), ScoreError> {
        self.high_score.set(score);
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file: ScoreFile = serde_json::from_str(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::ScoreError;

    use super::{HighScoreStore, JsonFileStore, MemoryStore};

    #[test]
    fn saved_score_is_loaded_back() {
        let store = JsonFileStore::new(unique_test_path("saved"));

        store.save(42).expect("score save should succeed");

        assert_eq!(store.load().expect("load should succeed"), 42);
        cleanup_test_path(store.path());
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let store = JsonFileStore::new(unique_test_path("missing"));

        assert_eq!(store.load().expect("missing file should return Ok(0)"), 0);
    }

    #[test]
    fn malformed_score_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let result = JsonFileStore::new(path.clone()).load();

        assert!(matches!(result, Err(ScoreError::Parse(_))));
        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_keeps_last_saved_value() {
        let store = MemoryStore::with_score(3);
        assert_eq!(store.load().expect("memory load"), 3);

        store.save(8).expect("memory save");

        assert_eq!(store.load().expect("memory load"), 8);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-levels-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &std::path::Path) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
