//! # AppError
//!
//! Centralized error handling for the Quill-Board ecosystem.
//! Maps domain-specific failures to actionable error types. Operations fail
//! fast and surface the error kind to the immediate caller; there is no
//! retry layer because storage is assumed always-available.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all qb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login failure: no credential matches email + password exactly.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration failure: the email already exists (case-insensitive).
    #[error("email already in use")]
    EmailInUse,

    /// The referenced user id or email is missing from the credential table.
    #[error("user not found")]
    UserNotFound,

    /// The supplied reset code does not match the pending code for the email.
    #[error("invalid verification code")]
    InvalidCode,

    /// The operation requires an authenticated session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The referenced post does not exist.
    #[error("post not found with id {0}")]
    PostNotFound(Uuid),

    /// Capability check failure (e.g., editing someone else's post).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A persisted collection failed to decode. The owning repository
    /// resolves this by falling back to empty/seed data.
    #[error("corrupt state for key {key}: {reason}")]
    CorruptState { key: String, reason: String },

    /// Serialization or other infrastructure failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for Quill-Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
