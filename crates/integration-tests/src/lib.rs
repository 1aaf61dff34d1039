//! Shared fixtures for the behavioral test suites.

use qb_core::models::{Category, PostDraft};
use qb_core::traits::DurableStore;
use qb_services::{PostService, SessionManager};
use qb_store_memory::MemoryStore;
use std::sync::Arc;

/// A fresh in-memory store shared by both service surfaces, the way a UI
/// process would wire them.
pub fn fresh_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn session_manager(store: Arc<dyn DurableStore>) -> SessionManager {
    SessionManager::new(store)
}

pub fn post_service(store: Arc<dyn DurableStore>) -> PostService {
    PostService::new(store)
}

pub fn draft(title: &str, category: Category) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: format!("<p>Body of {title}.</p>"),
        excerpt: None,
        cover_image: None,
        category,
    }
}
