//! Results handed back to display surfaces.

use serde::{Deserialize, Serialize};
use veriskill_types::{Step, Timestamp, TrustBadge, VerificationStatus};

/// Result of one committed quiz submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Whether the exact ratio reached the pass threshold.
    pub passed: bool,
    pub correct: u32,
    pub total: u32,
    /// Rounded percentage, for display.
    pub percentage: u32,
    /// Status now stored for the user.
    pub next_status: VerificationStatus,
    /// True only for a technician who just completed step 1.
    pub has_next_step: bool,
    /// The step to offer next when `has_next_step` is set.
    pub next_step: Option<Step>,
}

/// Read-only summary of where a user stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub status: VerificationStatus,
    /// Highest step attempted; 0 before the first submission.
    pub step: u8,
    pub required_steps: u8,
    pub next_step: Option<Step>,
    pub badge: TrustBadge,
    pub last_score: Option<(u32, u32)>,
    /// When a failed user may retry. Informational unless the cooldown is enforced.
    pub retry_available_at: Option<Timestamp>,
}
