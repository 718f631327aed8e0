//! Verification progression engine.
//!
//! Users prove domain skill through role-specific quizzes:
//! 1. **Quiz session**: an ordered question set, the learner's answers, and a raw score.
//! 2. **Policy**: a pure mapping from (role, domain, step, passed) to the next status.
//! 3. **Orchestrator**: begins steps, scores submissions, and commits each
//!    transition to the user store as one atomic update.
//! 4. **Badge**: derives the recruiter-facing trust tier from the stored status
//!    and the independent admin flag.
//!
//! Passing the quiz alone never yields the highest tier: an administrator has
//! to confirm the user through [`AdminActions`].

pub mod admin;
pub mod badge;
pub mod error;
pub mod orchestrator;
pub mod outcomes;
pub mod policy;
pub mod session;

pub use admin::AdminActions;
pub use badge::{resolve, resolve_trust_badge};
pub use error::VerificationError;
pub use orchestrator::VerificationOrchestrator;
pub use outcomes::{Progress, SubmissionOutcome};
pub use session::{QuizSession, Score};
