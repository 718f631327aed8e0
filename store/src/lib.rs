//! Abstract storage traits for the verification engine.
//!
//! Every backend (LMDB, in-memory for testing) implements these traits. The
//! engine depends only on the traits.

pub mod error;
pub mod question;
pub mod user;

pub use error::StoreError;
pub use question::QuestionProvider;
pub use user::UserStore;
