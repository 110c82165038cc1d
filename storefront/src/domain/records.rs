//! Version-tagged persisted record envelopes.
//!
//! Every engine persists its whole collection as one envelope: a version
//! tag, a write timestamp, and the item list. Decoding validates the shape
//! and version so engines can reset to empty on anything unexpected instead
//! of trusting arbitrary JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::domain::ports::{StateKey, StateStore};

/// Version written to (and required of) every persisted record.
pub const RECORD_VERSION: u32 = 1;

/// Reasons a persisted record was rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record was not valid JSON of the expected shape.
    #[error("malformed record: {message}")]
    Malformed {
        /// Description of the failure.
        message: String,
    },
    /// The record carries a version this build does not understand.
    #[error("unsupported record version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Version this build writes and reads.
        expected: u32,
        /// Version found in the record.
        actual: u32,
    },
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope<T> {
    version: u32,
    // The timestamp is informational; engines ignore it on load.
    #[serde(rename = "savedAt")]
    _saved_at: DateTime<Utc>,
    items: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    items: &'a [T],
}

/// Serialise a collection into a versioned record.
///
/// # Errors
///
/// Returns [`RecordError::Malformed`] if serialisation fails, which only
/// happens when an item holds non-serialisable data.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String, RecordError> {
    let envelope = EnvelopeRef {
        version: RECORD_VERSION,
        saved_at: Utc::now(),
        items,
    };
    serde_json::to_string(&envelope).map_err(|e| RecordError::Malformed {
        message: e.to_string(),
    })
}

/// Decode a versioned record back into its item list.
///
/// # Errors
///
/// Returns [`RecordError::Malformed`] for anything that is not a
/// well-formed envelope and [`RecordError::UnsupportedVersion`] for version
/// mismatches.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, RecordError> {
    let envelope: Envelope<T> =
        serde_json::from_str(raw).map_err(|e| RecordError::Malformed {
            message: e.to_string(),
        })?;
    if envelope.version != RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion {
            expected: RECORD_VERSION,
            actual: envelope.version,
        });
    }
    Ok(envelope.items)
}

/// Load a persisted collection, resetting to empty on anything unexpected.
///
/// Missing records, unreadable storage, malformed or version-mismatched
/// envelopes, and invariant-violating item lists all reset to an empty
/// collection with a logged warning. Nothing here ever propagates an error:
/// a failure at this boundary must not break application startup.
pub fn load_or_reset<T, S, F>(store: &S, key: StateKey, invariant: F) -> Vec<T>
where
    T: DeserializeOwned,
    S: StateStore + ?Sized,
    F: Fn(&[T]) -> bool,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(%key, %error, "state store unreadable; starting with an empty collection");
            return Vec::new();
        }
    };

    match decode::<T>(&raw) {
        Ok(items) if invariant(&items) => items,
        Ok(_) => {
            warn!(%key, "persisted record violates collection invariants; resetting to empty");
            Vec::new()
        }
        Err(error) => {
            warn!(%key, %error, "persisted record unreadable; resetting to empty");
            Vec::new()
        }
    }
}

/// Write a collection through to its storage key.
///
/// Failures are logged and swallowed: the in-memory collection stays
/// authoritative for the rest of the session.
pub fn persist_collection<T, S>(store: &S, key: StateKey, items: &[T])
where
    T: Serialize,
    S: StateStore + ?Sized,
{
    match encode(items) {
        Ok(encoded) => {
            if let Err(error) = store.save(key, &encoded) {
                warn!(%key, %error, "failed to persist record; keeping in-memory state");
            }
        }
        Err(error) => {
            warn!(%key, %error, "failed to encode record; keeping in-memory state");
        }
    }
}
