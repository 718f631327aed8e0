//! LMDB storage backend for the verification engine.
//!
//! Implements the `veriskill-store` traits using the `heed` LMDB bindings.
//! Each logical store maps to one LMDB database within a single environment,
//! and every trait method runs in its own LMDB transaction.

pub mod environment;
pub mod error;
pub mod question;
pub mod user;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use question::LmdbQuestionStore;
pub use user::LmdbUserStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LmdbError> {
    bincode::serialize(value).map_err(|e| LmdbError::Serialization(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
}
