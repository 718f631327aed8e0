//! Verification service: wires the engine to durable storage.
//!
//! The service owns:
//! - Configuration loaded from TOML (data directory, logging, engine parameters)
//! - Structured logging initialisation
//! - The LMDB environment backing user records and question sets
//! - The verification orchestrator and admin action surface built on top of it

pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use service::VerificationService;
