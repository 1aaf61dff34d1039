//! quill-board/crates/qb-services/src/lib.rs
//!
//! The data-and-session layer: identity repository, session manager, post
//! repository, and the authorized post service. Each repository is the
//! sole writer of its collection key in the Durable Store; the UI layer is
//! a thin consumer of the surfaces exported here.

pub mod authz;
pub mod identity;
pub mod posts;
pub mod seed;
pub mod session;

pub use identity::IdentityRepository;
pub use posts::{PostRepository, PostService};
pub use session::SessionManager;
