//! # Capability Checks
//!
//! The post repository deliberately does not re-check ownership on
//! `update`/`delete`; this module is the single place that authorization
//! lives, and `PostService` applies it in front of every mutating call.
//! Any future caller that bypasses `PostService` must replicate these
//! checks or ownership is unenforced.

use qb_core::error::{AppError, Result};
use qb_core::models::{BlogPost, UserProfile};

/// Rejects anonymous actors.
pub fn require_user(actor: Option<&UserProfile>) -> Result<&UserProfile> {
    actor.ok_or(AppError::NotAuthenticated)
}

/// Rejects actors who do not own the post.
pub fn require_author(post: &BlogPost, actor: &UserProfile) -> Result<()> {
    if post.author_id != actor.id {
        return Err(AppError::Unauthorized(format!(
            "user {} does not own post {}",
            actor.id, post.id
        )));
    }
    Ok(())
}
