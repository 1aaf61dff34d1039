//! # Post Repository & Service
//!
//! [`PostRepository`] owns the post collection: one serialized ordered
//! sequence under one key, newest-first, with this repository as its only
//! writer. It performs no authorization of its own.
//!
//! [`PostService`] is the collaborator-facing surface: it wraps the
//! repository with the capability checks from [`crate::authz`] and wires
//! in the reaction engine.

use crate::{authz, seed};
use qb_core::codec;
use qb_core::error::{AppError, Result};
use qb_core::models::{BlogPost, Category, PostDraft, PostPatch, UserProfile};
use qb_core::reactions;
use qb_core::traits::DurableStore;
use std::sync::Arc;
use uuid::Uuid;

/// Storage key for the post collection.
pub const POSTS_KEY: &str = "blog-app-posts";

/// Excerpts derived from content are cut at this many characters.
const EXCERPT_LEN: usize = 150;

/// Stock cover for drafts that do not supply one.
const DEFAULT_COVER_IMAGE: &str =
    "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?auto=format&fit=crop&w=800";

pub struct PostRepository {
    store: Arc<dyn DurableStore>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    /// Loads the collection. An absent key or a corrupt blob falls back to
    /// the seed posts, which are written back so the fallback is durable.
    fn load(&self) -> Vec<BlogPost> {
        match self.store.get(POSTS_KEY) {
            Some(raw) => match codec::decode(POSTS_KEY, &raw) {
                Ok(posts) => posts,
                Err(e) => {
                    log::warn!("resetting post collection to seed data: {e}");
                    self.reset_to_seed()
                }
            },
            None => self.reset_to_seed(),
        }
    }

    fn reset_to_seed(&self) -> Vec<BlogPost> {
        let posts = seed::sample_posts();
        if let Ok(raw) = codec::encode(&posts) {
            self.store.set(POSTS_KEY, &raw);
        }
        posts
    }

    /// Writes the full collection back before the mutating operation
    /// returns, so no mutation is ever partially applied.
    fn save(&self, posts: &[BlogPost]) -> Result<()> {
        let raw = codec::encode(&posts)?;
        self.store.set(POSTS_KEY, &raw);
        Ok(())
    }

    /// Posts sorted by `createdAt` descending (newest first), optionally
    /// filtered by exact category. The sort is stable, so equal timestamps
    /// keep their stored order.
    pub fn list(&self, category: Option<Category>) -> Vec<BlogPost> {
        let mut posts = self.load();
        if let Some(category) = category {
            posts.retain(|post| post.category == category);
        }
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub fn get(&self, id: Uuid) -> Option<BlogPost> {
        self.load().into_iter().find(|post| post.id == id)
    }

    /// Unordered filter on authorship; callers re-sort as needed.
    pub fn list_by_author(&self, author_id: Uuid) -> Vec<BlogPost> {
        self.load()
            .into_iter()
            .filter(|post| post.author_id == author_id)
            .collect()
    }

    /// Unordered filter on favorite membership.
    pub fn list_favorited_by(&self, user_id: Uuid) -> Vec<BlogPost> {
        self.load()
            .into_iter()
            .filter(|post| post.favorites.contains(&user_id))
            .collect()
    }

    /// Assigns a fresh v7 id and the current instant, derives the excerpt
    /// and cover image when the draft omits them, starts all reaction sets
    /// empty, and prepends (the collection stays newest-first because
    /// creation order correlates with the timestamp).
    pub fn create(&self, draft: PostDraft, author: &UserProfile) -> Result<BlogPost> {
        let excerpt = draft
            .excerpt
            .unwrap_or_else(|| derive_excerpt(&draft.content));
        let post = BlogPost {
            id: Uuid::now_v7(),
            title: draft.title,
            content: draft.content,
            excerpt,
            cover_image: draft
                .cover_image
                .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string()),
            category: draft.category,
            author_id: author.id,
            author_name: author.name.clone(),
            author_image: author.profile_picture.clone(),
            created_at: chrono::Utc::now(),
            likes: Default::default(),
            dislikes: Default::default(),
            favorites: Default::default(),
        };

        let mut posts = self.load();
        posts.insert(0, post.clone());
        self.save(&posts)?;
        Ok(post)
    }

    /// Merges only the provided fields. Authorship is not re-checked here;
    /// that is `PostService`'s job (see crate::authz).
    pub fn update(&self, id: Uuid, patch: PostPatch) -> Result<BlogPost> {
        let mut posts = self.load();
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(AppError::PostNotFound(id))?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(cover_image) = patch.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(category) = patch.category {
            post.category = category;
        }
        let updated = post.clone();
        self.save(&posts)?;
        Ok(updated)
    }

    /// Unconditional removal; authorization is the caller's responsibility.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut posts = self.load();
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(AppError::PostNotFound(id));
        }
        self.save(&posts)
    }

    /// Read-modify-write of a single post, used by the reaction surface.
    fn mutate(&self, id: Uuid, apply: impl FnOnce(&mut BlogPost)) -> Result<BlogPost> {
        let mut posts = self.load();
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(AppError::PostNotFound(id))?;
        apply(post);
        let updated = post.clone();
        self.save(&posts)?;
        Ok(updated)
    }
}

/// First [`EXCERPT_LEN`] characters of the content plus an ellipsis.
fn derive_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_LEN).collect();
    format!("{head}...")
}

/// The authorized, collaborator-facing post surface.
///
/// Operations are `async` deferred-completion wrappers around the
/// repository's synchronous read-modify-writes, mirroring the session
/// manager's surface.
pub struct PostService {
    repo: PostRepository,
}

impl PostService {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self {
            repo: PostRepository::new(store),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn list(&self, category: Option<Category>) -> Vec<BlogPost> {
        self.repo.list(category)
    }

    pub fn get(&self, id: Uuid) -> Option<BlogPost> {
        self.repo.get(id)
    }

    pub fn list_by_author(&self, author_id: Uuid) -> Vec<BlogPost> {
        self.repo.list_by_author(author_id)
    }

    pub fn list_favorited_by(&self, user_id: Uuid) -> Vec<BlogPost> {
        self.repo.list_favorited_by(user_id)
    }

    pub fn is_liked(&self, post_id: Uuid, user_id: Uuid) -> bool {
        self.repo
            .get(post_id)
            .is_some_and(|post| reactions::is_liked(&post, user_id))
    }

    pub fn is_disliked(&self, post_id: Uuid, user_id: Uuid) -> bool {
        self.repo
            .get(post_id)
            .is_some_and(|post| reactions::is_disliked(&post, user_id))
    }

    pub fn is_favorited(&self, post_id: Uuid, user_id: Uuid) -> bool {
        self.repo
            .get(post_id)
            .is_some_and(|post| reactions::is_favorited(&post, user_id))
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Fails with `NotAuthenticated` for anonymous actors.
    pub async fn create(&self, draft: PostDraft, actor: Option<&UserProfile>) -> Result<BlogPost> {
        let author = authz::require_user(actor)?;
        self.repo.create(draft, author)
    }

    /// Fails with `Unauthorized` unless the actor owns the post.
    pub async fn update(
        &self,
        id: Uuid,
        patch: PostPatch,
        actor: Option<&UserProfile>,
    ) -> Result<BlogPost> {
        let actor = authz::require_user(actor)?;
        let post = self.repo.get(id).ok_or(AppError::PostNotFound(id))?;
        authz::require_author(&post, actor)?;
        self.repo.update(id, patch)
    }

    /// Fails with `Unauthorized` unless the actor owns the post.
    pub async fn delete(&self, id: Uuid, actor: Option<&UserProfile>) -> Result<()> {
        let actor = authz::require_user(actor)?;
        let post = self.repo.get(id).ok_or(AppError::PostNotFound(id))?;
        authz::require_author(&post, actor)?;
        self.repo.delete(id)
    }

    pub async fn like(&self, id: Uuid, actor: Option<&UserProfile>) -> Result<BlogPost> {
        let user = authz::require_user(actor)?;
        self.repo
            .mutate(id, |post| reactions::toggle_like(post, user.id))
    }

    pub async fn dislike(&self, id: Uuid, actor: Option<&UserProfile>) -> Result<BlogPost> {
        let user = authz::require_user(actor)?;
        self.repo
            .mutate(id, |post| reactions::toggle_dislike(post, user.id))
    }

    pub async fn favorite(&self, id: Uuid, actor: Option<&UserProfile>) -> Result<BlogPost> {
        let user = authz::require_user(actor)?;
        self.repo
            .mutate(id, |post| reactions::toggle_favorite(post, user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qb_store_memory::MemoryStore;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            id: Uuid::now_v7(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            profile_picture: None,
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            content: "<p>Some content.</p>".into(),
            excerpt: None,
            cover_image: None,
            category: Category::Technology,
        }
    }

    fn repo() -> PostRepository {
        PostRepository::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_empty_store_falls_back_to_seed() {
        let store = Arc::new(MemoryStore::new());
        let repo = PostRepository::new(store.clone());
        let posts = repo.list(None);
        assert_eq!(posts, seed::sample_posts());
        // The fallback is written back.
        assert!(store.get(POSTS_KEY).is_some());
    }

    #[test]
    fn test_corrupt_collection_falls_back_to_seed() {
        let store = Arc::new(MemoryStore::new());
        store.set(POSTS_KEY, "[[[[");
        let repo = PostRepository::new(store);
        assert_eq!(repo.list(None), seed::sample_posts());
    }

    #[test]
    fn test_create_derives_excerpt_and_defaults() {
        let repo = repo();
        let author = profile("Alice");
        let long_content = "x".repeat(300);
        let post = repo
            .create(
                PostDraft {
                    title: "Long".into(),
                    content: long_content,
                    excerpt: None,
                    cover_image: None,
                    category: Category::Movies,
                },
                &author,
            )
            .unwrap();

        assert_eq!(post.excerpt.chars().count(), EXCERPT_LEN + 3);
        assert!(post.excerpt.ends_with("..."));
        assert_eq!(post.cover_image, DEFAULT_COVER_IMAGE);
        assert_eq!(post.author_id, author.id);
        assert!(post.likes.is_empty() && post.dislikes.is_empty() && post.favorites.is_empty());
    }

    #[test]
    fn test_create_keeps_supplied_excerpt() {
        let repo = repo();
        let post = repo
            .create(
                PostDraft {
                    excerpt: Some("hand-written".into()),
                    ..draft("T")
                },
                &profile("Alice"),
            )
            .unwrap();
        assert_eq!(post.excerpt, "hand-written");
    }

    #[test]
    fn test_list_sorts_newest_first() {
        let repo = repo();
        let author = profile("Alice");
        let a = repo.create(draft("first"), &author).unwrap();
        let b = repo.create(draft("second"), &author).unwrap();

        let listed = repo.list(None);
        let pos_a = listed.iter().position(|p| p.id == a.id).unwrap();
        let pos_b = listed.iter().position(|p| p.id == b.id).unwrap();
        assert!(pos_b < pos_a);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_category_filter_is_exact() {
        let repo = repo();
        let author = profile("Alice");
        repo.create(
            PostDraft {
                category: Category::Gaming,
                ..draft("g")
            },
            &author,
        )
        .unwrap();

        let gaming = repo.list(Some(Category::Gaming));
        assert!(gaming.iter().all(|p| p.category == Category::Gaming));
        assert!(gaming.iter().any(|p| p.title == "g"));
    }

    #[test]
    fn test_update_merges_and_missing_id_fails() {
        let repo = repo();
        let post = repo.create(draft("orig"), &profile("Alice")).unwrap();

        let updated = repo
            .update(
                post.id,
                PostPatch {
                    title: Some("new title".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.author_id, post.author_id);

        let missing = Uuid::now_v7();
        assert!(matches!(
            repo.update(missing, PostPatch::default()),
            Err(AppError::PostNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_delete_removes_and_missing_id_fails() {
        let repo = repo();
        let post = repo.create(draft("bye"), &profile("Alice")).unwrap();
        repo.delete(post.id).unwrap();
        assert!(repo.get(post.id).is_none());
        assert!(matches!(
            repo.delete(post.id),
            Err(AppError::PostNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_service_requires_authentication() {
        let service = PostService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.create(draft("x"), None).await,
            Err(AppError::NotAuthenticated)
        ));
        let seeded = service.list(None);
        assert!(matches!(
            service.like(seeded[0].id, None).await,
            Err(AppError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_service_enforces_ownership() {
        let service = PostService::new(Arc::new(MemoryStore::new()));
        let alice = profile("Alice");
        let mallory = profile("Mallory");

        let post = service.create(draft("alice's"), Some(&alice)).await.unwrap();
        assert!(matches!(
            service
                .update(post.id, PostPatch::default(), Some(&mallory))
                .await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.delete(post.id, Some(&mallory)).await,
            Err(AppError::Unauthorized(_))
        ));
        // But anyone authenticated may react.
        let reacted = service.like(post.id, Some(&mallory)).await.unwrap();
        assert!(reacted.likes.contains(&mallory.id));
    }
}
