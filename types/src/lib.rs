//! Fundamental types for the skill verification engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! roles and domains, verification statuses and trust badges, the user verification
//! record, quiz questions, engine parameters, and timestamps.

pub mod error;
pub mod params;
pub mod question;
pub mod role;
pub mod state;
pub mod time;
pub mod user;

pub use error::TypesError;
pub use params::VerificationParams;
pub use question::{AnswerOption, LocalizedText, Question, QuestionId};
pub use role::{Domain, Role, VehicleCategory};
pub use state::{Step, TrustBadge, VerificationStatus};
pub use time::{Clock, SystemClock, Timestamp};
pub use user::{UserId, UserVerificationRecord, VerificationUpdate};
