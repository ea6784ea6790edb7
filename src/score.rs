use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::HIGH_SCORE_KEY;
use crate::error::StoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// String key/value persistence the high score is kept in.
pub trait ScoreStore {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the backing storage exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Returns the platform-correct score file path.
///
/// # Errors
///
/// Returns [`StoreError::NoPath`] when the platform has no local data
/// directory.
pub fn default_scores_path() -> Result<PathBuf, StoreError> {
    dirs::data_local_dir()
        .map(|base| base.join(APP_DIR_NAME).join(SCORE_FILE_NAME))
        .ok_or(StoreError::NoPath)
}

/// Keys and values in a pretty-printed JSON object on disk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };
        serde_json::from_str(&raw).map_err(StoreError::Parse)
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // An unreadable file is overwritten rather than blocking every save.
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let mut json = serde_json::to_string_pretty(&entries).map_err(StoreError::Serialize)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(StoreError::Write)
    }
}

/// Process-local store, for tests and for running without persistence.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Best score seen so far, mirrored into a [`ScoreStore`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct HighScore {
    value: u32,
}

impl HighScore {
    /// Reads the stored high score. Any failure falls back to zero so that
    /// a broken store never blocks play.
    #[must_use]
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        let value = match store.get(HIGH_SCORE_KEY).and_then(|raw| parse_score(raw.as_deref())) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "high score unavailable, starting from 0");
                0
            }
        };
        debug!(value, "loaded high score");
        Self { value }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.value
    }

    /// Raises the high score to `score` if it is higher and persists it.
    /// Returns whether the value changed. A failed write is logged and the
    /// in-memory value is kept.
    pub fn record<S: ScoreStore + ?Sized>(&mut self, score: u32, store: &mut S) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(error) = store.set(HIGH_SCORE_KEY, &score.to_string()) {
            warn!(%error, score, "failed to persist high score");
        }
        true
    }
}

fn parse_score(raw: Option<&str>) -> Result<u32, StoreError> {
    match raw {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidValue(raw.to_owned())),
    }
}
