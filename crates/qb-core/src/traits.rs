//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the
//! services layer.

/// Durable key → string persistence contract.
///
/// Synchronous and infallible from the caller's point of view: writes are
/// assumed to succeed, and implementations must swallow (and log) any I/O
/// failure rather than surface it. There are no transactional guarantees
/// across keys — callers needing multi-key consistency must read-modify-write
/// a single composite value, which is why each logical collection is stored
/// as one serialized blob under one key.
pub trait DurableStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Deletes `key` if present.
    fn remove(&self, key: &str);
}
