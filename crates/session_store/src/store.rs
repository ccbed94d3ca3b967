use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SessionStoreError;
use crate::paths::temp_path_for;
use crate::schema::{StateDocument, StoredValue, STATE_VERSION};

/// String key-value storage that outlives the process.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        (**self).remove(key)
    }
}

/// In-process store; nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Single JSON document on disk. Every operation re-reads the file so edits
/// from another client process are picked up.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document; a missing file is an empty document.
    pub fn load(&self) -> Result<StateDocument, SessionStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Ok(StateDocument::default());
            }
            Err(source) => {
                return Err(SessionStoreError::io(
                    "reading state file",
                    &self.path,
                    source,
                ));
            }
        };

        let document = serde_json::from_str::<StateDocument>(&text)
            .map_err(|source| SessionStoreError::json_parse(&self.path, source))?;
        validate_document(&self.path, &document)?;
        Ok(document)
    }

    /// Like [`load`](Self::load), but an unreadable document is replaced by an
    /// empty one so the next save overwrites it. I/O errors still propagate.
    fn load_for_write(&self) -> Result<StateDocument, SessionStoreError> {
        match self.load() {
            Err(
                error @ (SessionStoreError::JsonParse { .. }
                | SessionStoreError::UnsupportedVersion { .. }
                | SessionStoreError::InvalidTimestamp { .. }),
            ) => {
                tracing::warn!(error = %error, "discarding unreadable client state");
                Ok(StateDocument::default())
            }
            other => other,
        }
    }

    /// Writes through a sibling temp file, then renames it over the target.
    pub fn save(&self, document: &StateDocument) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                SessionStoreError::io("creating state directory", parent, source)
            })?;
        }

        let mut text = serde_json::to_string_pretty(document)
            .map_err(|source| SessionStoreError::json_serialize(&self.path, source))?;
        text.push('\n');

        let temp_path = temp_path_for(&self.path);
        fs::write(&temp_path, text).map_err(|source| {
            SessionStoreError::io("writing temporary state file", &temp_path, source)
        })?;
        fs::rename(&temp_path, &self.path)
            .map_err(|source| SessionStoreError::io("replacing state file", &self.path, source))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self
            .load()?
            .entries
            .get(key)
            .map(|stored| stored.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut document = self.load_for_write()?;
        document
            .entries
            .insert(key.to_owned(), StoredValue::new(value, now_rfc3339()?));
        self.save(&document)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        let mut document = self.load_for_write()?;
        if document.entries.remove(key).is_some() {
            self.save(&document)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_document(
    path: &Path,
    document: &StateDocument,
) -> Result<(), SessionStoreError> {
    if document.version != STATE_VERSION {
        return Err(SessionStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: document.version,
        });
    }

    for (key, stored) in &document.entries {
        if OffsetDateTime::parse(&stored.updated_at, &Rfc3339).is_err() {
            return Err(SessionStoreError::InvalidTimestamp {
                path: path.to_path_buf(),
                key: key.clone(),
                value: stored.updated_at.clone(),
            });
        }
    }

    Ok(())
}

fn now_rfc3339() -> Result<String, SessionStoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(SessionStoreError::ClockFormat)
}
