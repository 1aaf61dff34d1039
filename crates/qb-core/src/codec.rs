//! # Collection Codec
//!
//! Versioned JSON envelope for every collection persisted through the
//! [`DurableStore`](crate::traits::DurableStore). Decode failures surface as
//! [`AppError::CorruptState`] so the owning repository can apply its defined
//! fallback (empty table / seed posts) instead of propagating an
//! unstructured parse error.

use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Bumped whenever the shape of a persisted collection changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    schema: u32,
    data: T,
}

/// Serializes `value` inside a versioned envelope.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    let envelope = Envelope {
        schema: SCHEMA_VERSION,
        data: value,
    };
    serde_json::to_string(&envelope).map_err(|e| AppError::Internal(e.to_string()))
}

/// Decodes a versioned envelope back into its payload.
///
/// A parse failure or a schema mismatch yields `CorruptState` tagged with
/// the originating key.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(raw).map_err(|e| AppError::CorruptState {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    if envelope.schema != SCHEMA_VERSION {
        return Err(AppError::CorruptState {
            key: key.to_string(),
            reason: format!(
                "unsupported schema version {} (expected {})",
                envelope.schema, SCHEMA_VERSION
            ),
        });
    }
    Ok(envelope.data)
}
