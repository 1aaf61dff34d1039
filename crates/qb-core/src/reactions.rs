//! # Reaction Engine
//!
//! Pure toggles over a post's three reaction sets, each keyed by the acting
//! user id. Likes and dislikes are mutually exclusive; favorites are
//! independent. Every toggle is its own inverse: applying the same
//! operation twice returns the post to its prior state.
//!
//! The engine does not authenticate — callers must reject unauthenticated
//! actors before invoking it.

use crate::models::BlogPost;
use uuid::Uuid;

/// Toggles `user`'s like on `post`. Adding a like removes any standing
/// dislike from the same user.
pub fn toggle_like(post: &mut BlogPost, user: Uuid) {
    if !post.likes.remove(&user) {
        post.likes.insert(user);
        post.dislikes.remove(&user);
    }
}

/// Toggles `user`'s dislike on `post`. Adding a dislike removes any
/// standing like from the same user.
pub fn toggle_dislike(post: &mut BlogPost, user: Uuid) {
    if !post.dislikes.remove(&user) {
        post.dislikes.insert(user);
        post.likes.remove(&user);
    }
}

/// Toggles `user`'s favorite on `post`, unaffected by like/dislike state.
pub fn toggle_favorite(post: &mut BlogPost, user: Uuid) {
    if !post.favorites.remove(&user) {
        post.favorites.insert(user);
    }
}

pub fn is_liked(post: &BlogPost, user: Uuid) -> bool {
    post.likes.contains(&user)
}

pub fn is_disliked(post: &BlogPost, user: Uuid) -> bool {
    post.dislikes.contains(&user)
}

pub fn is_favorited(post: &BlogPost, user: Uuid) -> bool {
    post.favorites.contains(&user)
}
