//! quill-board/crates/qb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Quill-Board.

pub mod codec;
pub mod error;
pub mod models;
pub mod reactions;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
