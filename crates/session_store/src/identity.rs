use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::KeyValueStore;

/// Storage key holding the last-used session id.
pub const SESSION_STORAGE_KEY: &str = "rule_checker_session_id";

/// Prefix of generated session ids.
pub const SESSION_ID_PREFIX: &str = "demo-";

const GENERATED_SUFFIX_LEN: usize = 8;

/// Trimmed, non-empty conversation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Trims `value`; `None` when nothing is left.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// `demo-` followed by eight lowercase hex digits from a random v4 UUID.
    #[must_use]
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{SESSION_ID_PREFIX}{}",
            &random[..GENERATED_SUFFIX_LEN]
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "session id must not be blank".to_owned())
    }
}

impl From<SessionId> for String {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

/// Owns the current session id and keeps it in a [`KeyValueStore`].
///
/// `current` mirrors an editable input field: it may hold untrimmed or blank
/// text, while [`SessionIdentity::get`] always hands out a trimmed, non-empty
/// id. Storage failures are logged and never surface to the caller.
#[derive(Debug)]
pub struct SessionIdentity<S> {
    store: S,
    current: String,
    persisted: bool,
}

impl<S: KeyValueStore> SessionIdentity<S> {
    /// Adopts the stored id, or a freshly generated one that is only written
    /// back on the next [`get`](Self::get) or [`set`](Self::set).
    pub fn restore(store: S) -> Self {
        let stored = match store.get(SESSION_STORAGE_KEY) {
            Ok(value) => value.and_then(|value| SessionId::parse(&value)),
            Err(error) => {
                tracing::warn!(error = %error, "failed to read stored session id");
                None
            }
        };

        match stored {
            Some(id) => Self {
                store,
                current: id.0,
                persisted: true,
            },
            None => Self {
                store,
                current: SessionId::generate().0,
                persisted: false,
            },
        }
    }

    /// Returns the current id, generating and storing one when the current
    /// value is blank. Repeated calls without edits return the same id.
    pub fn get(&mut self) -> SessionId {
        let id = match SessionId::parse(&self.current) {
            Some(id) => id,
            None => {
                let id = SessionId::generate();
                tracing::debug!(session_id = %id, "generated session id");
                self.current = id.as_str().to_owned();
                self.persisted = false;
                id
            }
        };

        if !self.persisted {
            self.persist(Some(&id));
        }
        id
    }

    /// Explicit user edit. Blank input clears the stored value.
    pub fn set(&mut self, value: &str) {
        self.current = value.to_owned();
        let id = SessionId::parse(value);
        self.persist(id.as_ref());
    }

    /// Raw value of the editable field.
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, id: Option<&SessionId>) {
        let result = match id {
            Some(id) => self.store.set(SESSION_STORAGE_KEY, id.as_str()),
            None => self.store.remove(SESSION_STORAGE_KEY),
        };
        match result {
            Ok(()) => self.persisted = true,
            Err(error) => {
                self.persisted = false;
                tracing::warn!(error = %error, "failed to persist session id");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn is_generated(id: &str) -> bool {
        id.strip_prefix(SESSION_ID_PREFIX).is_some_and(|suffix| {
            suffix.len() == 8
                && suffix
                    .chars()
                    .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
        })
    }

    #[test]
    fn generated_ids_match_demo_pattern() {
        for _ in 0..32 {
            let id = SessionId::generate();
            assert!(is_generated(id.as_str()), "{id}");
        }
    }

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(
            SessionId::parse("  team-a  ").map(|id| id.as_str().to_owned()),
            Some("team-a".to_owned())
        );
        assert!(SessionId::parse(" \t\n").is_none());
    }

    #[test]
    fn serde_rejects_blank_ids() {
        assert!(serde_json::from_str::<SessionId>("\"   \"").is_err());
        let id: SessionId = serde_json::from_str("\" s-1 \"").expect("valid id");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"s-1\"");
    }

    #[test]
    fn restore_generates_without_persisting() {
        let identity = SessionIdentity::restore(MemoryStore::new());
        assert!(is_generated(identity.current_input()));
        assert_eq!(
            identity.store().get(SESSION_STORAGE_KEY).expect("memory get"),
            None
        );
    }

    #[test]
    fn blank_input_synthesizes_and_stays_stable() {
        let mut identity = SessionIdentity::restore(MemoryStore::new());
        identity.set("   ");

        let first = identity.get();
        assert!(is_generated(first.as_str()));
        assert_eq!(identity.get(), first);
        assert_eq!(
            identity.store().get(SESSION_STORAGE_KEY).expect("memory get"),
            Some(first.as_str().to_owned())
        );
    }
}
