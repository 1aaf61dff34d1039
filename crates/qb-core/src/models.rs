//! # Domain Models
//!
//! These structs represent the core entities of Quill-Board.
//! We use UUID v7 for time-ordered, globally unique identification, and
//! camelCase field names on the wire to match the persisted JSON blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// The fixed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Gaming,
    Music,
    Movies,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> [Category; 4] {
        [
            Category::Technology,
            Category::Gaming,
            Category::Music,
            Category::Movies,
        ]
    }

    /// Human-readable label for UI consumption.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Gaming => "Gaming",
            Category::Music => "Music",
            Category::Movies => "Movies & TV",
        }
    }
}

/// A registered account: the credential table entry plus its key.
///
/// `email` is unique case-insensitively across all credentials. Credentials
/// are created on register, mutated on profile update or password reset,
/// and never deleted (there is no account-deletion path).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredential {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Stored and compared as plaintext by design; see DESIGN.md.
    pub password: String,
    pub profile_picture: Option<String>,
}

/// The stored credential-table value: a [`UserCredential`] minus its key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

impl CredentialRecord {
    /// Rebuilds the full credential from a table entry.
    pub fn into_credential(self, id: Uuid) -> UserCredential {
        UserCredential {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            profile_picture: self.profile_picture,
        }
    }
}

impl From<&UserCredential> for CredentialRecord {
    fn from(cred: &UserCredential) -> Self {
        Self {
            name: cred.name.clone(),
            email: cred.email.clone(),
            password: cred.password.clone(),
            profile_picture: cred.profile_picture.clone(),
        }
    }
}

/// The session-visible projection of a credential. Never persisted beyond
/// the current-session pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

impl From<&UserCredential> for UserProfile {
    fn from(cred: &UserCredential) -> Self {
        Self {
            id: cred.id,
            name: cred.name.clone(),
            email: cred.email.clone(),
            profile_picture: cred.profile_picture.clone(),
        }
    }
}

/// Partial profile update: only provided fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

/// A pending one-time password-reset code for a single email.
///
/// Only one code is active per email; a new request overwrites the old one.
/// Consumed (deleted) only by a successful password reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetCode {
    /// Six decimal digits, compared by exact string equality.
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

/// The fundamental unit of content.
///
/// Invariant: `likes` and `dislikes` are disjoint at all times. `favorites`
/// is independent of both. `id` and `author_id` are immutable after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: String,
    pub category: Category,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: HashSet<Uuid>,
    pub dislikes: HashSet<Uuid>,
    pub favorites: HashSet<Uuid>,
}

/// Author-supplied fields for a new post. Everything else (id, timestamps,
/// author attribution, reaction sets) is assigned by the repository.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Derived from the first 150 characters of `content` when absent.
    pub excerpt: Option<String>,
    /// Falls back to a stock cover image when absent.
    pub cover_image: Option<String>,
    pub category: Category,
}

/// Partial post update: only provided fields are applied. The post's id,
/// author attribution, timestamps, and reaction sets are not patchable.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<Category>,
}
