mod error;
mod identity;
mod paths;
mod schema;
mod store;

pub use error::SessionStoreError;
pub use identity::{SessionId, SessionIdentity, SESSION_ID_PREFIX, SESSION_STORAGE_KEY};
pub use paths::{default_state_path, STATE_DIR, STATE_FILE_NAME};
pub use schema::{StateDocument, StoredValue, STATE_VERSION};
pub use store::{FileStore, KeyValueStore, MemoryStore};
