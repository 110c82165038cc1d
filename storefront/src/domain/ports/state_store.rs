//! Durable state storage port.
//!
//! Cart, wishlist, and recently-viewed collections persist write-through as
//! one serialised record per key. The store works with opaque strings; the
//! versioned record encoding lives with the domain (see
//! [`crate::domain::records`]), and the reset-to-empty recovery policy lives
//! with the engines that own each key.

use std::fmt;

use thiserror::Error;

/// Storage keys owned by the storefront engines.
///
/// Each engine is the only writer of its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// The shopping cart record.
    Cart,
    /// The wishlist record.
    Wishlist,
    /// The recently-viewed record.
    RecentlyViewed,
}

impl StateKey {
    /// Stable identifier for the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::RecentlyViewed => "recently-viewed",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by state store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateStoreError {
    /// Reading or writing a key failed.
    #[error("state store I/O failed for key '{key}': {message}")]
    Io {
        /// Key being accessed.
        key: StateKey,
        /// Description of the failure.
        message: String,
    },
    /// The store itself is unusable (for example the state directory could
    /// not be opened).
    #[error("state store backend failure: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

impl StateStoreError {
    /// Helper for per-key I/O failures.
    pub fn io(key: StateKey, message: impl Into<String>) -> Self {
        Self::Io {
            key,
            message: message.into(),
        }
    }

    /// Helper for store-wide failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Persistence port for the engines' serialised records.
///
/// Loads return `Ok(None)` when a key has never been written; corrupt
/// contents are returned verbatim for the caller to classify, since the
/// store has no knowledge of the record schema.
pub trait StateStore: Send + Sync {
    /// Read the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError`] when the underlying storage cannot be
    /// read. A missing record is `Ok(None)`, not an error.
    fn load(&self, key: StateKey) -> Result<Option<String>, StateStoreError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError`] when the record cannot be written.
    fn save(&self, key: StateKey, contents: &str) -> Result<(), StateStoreError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StateKey::Cart, "cart")]
    #[case(StateKey::Wishlist, "wishlist")]
    #[case(StateKey::RecentlyViewed, "recently-viewed")]
    fn keys_have_stable_identifiers(#[case] key: StateKey, #[case] expected: &str) {
        assert_eq!(key.as_str(), expected);
        assert_eq!(key.to_string(), expected);
    }

    #[rstest]
    fn errors_carry_their_key() {
        let err = StateStoreError::io(StateKey::Cart, "disk full");
        assert_eq!(
            err.to_string(),
            "state store I/O failed for key 'cart': disk full"
        );
    }
}
