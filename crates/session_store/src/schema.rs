use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STATE_VERSION: u32 = 1;

/// On-disk shape of the client state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDocument {
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, StoredValue>,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: String,
}

impl StoredValue {
    #[must_use]
    pub fn new(value: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            updated_at: updated_at.into(),
        }
    }
}
