//! Get-with-default / set facade over a [`StorageMedium`].

use crate::StorageMedium;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current layout version of persisted envelopes.
pub const SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper every value is persisted inside.
#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    value: T,
}

/// Generic persistence facade.
///
/// Reads never fail from the caller's point of view: anything that prevents
/// the stored value from being produced falls back to the supplied default
/// with a warning in the log. Writes are best-effort: a failed write is
/// logged and otherwise ignored, because the collection the caller already
/// holds in memory stays authoritative for the rest of the session.
#[derive(Debug, Clone)]
pub struct Store<M> {
    medium: M,
}

impl<M: StorageMedium> Store<M> {
    /// Wraps a medium.
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `default` when the key is absent, the medium fails, the
    /// payload does not parse, or the payload was written by an unsupported
    /// schema version. Bare payloads without an envelope are accepted as the
    /// pre-versioning layout.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let payload = match self.medium.read(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!("failed to read stored value {}: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str::<Envelope<T>>(&payload) {
            Ok(envelope) if envelope.version == SCHEMA_VERSION => envelope.value,
            Ok(envelope) => {
                tracing::warn!(
                    "stored value {} has unsupported schema version {}",
                    key,
                    envelope.version
                );
                default
            }
            // Not an envelope. Payloads written before envelopes existed are
            // the value itself, so try that layout before giving up.
            Err(_) => match serde_json::from_str::<T>(&payload) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("failed to parse stored value {}: {}", key, e);
                    default
                }
            },
        }
    }

    /// Serializes `value` inside a versioned envelope and writes it under
    /// `key`. Failures are logged, never propagated.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let envelope = Envelope {
            version: SCHEMA_VERSION,
            value,
        };
        let payload = match serde_json::to_string(&envelope) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("failed to serialize value for {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.medium.write(key, &payload) {
            tracing::error!("failed to persist value for {}: {}", key, e);
        }
    }
}
