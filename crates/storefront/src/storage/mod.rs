//! Persistent key-value storage.
//!
//! All durable state is JSON blobs under string keys, the way a browser
//! profile stores per-site state. The [`KeyValueStore`] trait is the
//! explicit seam for that effect: the same cart/wallet/order logic runs
//! against the in-memory store in tests and the file-backed store in
//! the CLI, and could target an embedded or remote store without
//! change.
//!
//! Writes are whole-value replace-on-write. Nothing here is transactional:
//! two processes sharing a file store race last-write-wins, which is the
//! accepted behavior of the storage model, not a guarantee to build on.

mod file;
pub mod keys;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value did not decode as the expected JSON shape.
    #[error("stored value for key {key} is corrupt: {source}")]
    Corrupt {
        /// Key being accessed.
        key: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded to JSON.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        /// Key being accessed.
        key: String,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters the store refuses to map to a path.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A flat key-value store of JSON strings.
///
/// Implementations must be safe to share between threads; callers treat
/// a write as durable the moment it returns (there is no flush step).
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for a key, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// List every key currently present, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl dyn KeyValueStore + '_ {
    /// Read and decode the value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the stored JSON does not
    /// decode as `T`, or any error from [`KeyValueStore::read`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.read(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                    key: key.to_owned(),
                    source,
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode and write a value under a key (replace-on-write).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if the value does not serialize,
    /// or any error from [`KeyValueStore::write`].
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.write(key, &raw)
    }
}
