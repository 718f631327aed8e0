//! State enums for verification progress and trust badges.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The stored verification status of a user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Registered; no quiz passed yet.
    #[default]
    Pending,
    /// Technician passed step 1 and is expected to take step 2.
    #[serde(rename = "step1_completed")]
    Step1Completed,
    /// Legacy intermediate value. Never produced by the policy.
    #[serde(rename = "step2_pending")]
    Step2Pending,
    /// All required steps passed.
    Verified,
    /// Most recent attempt failed. Retry is allowed.
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Step1Completed => "step1_completed",
            Self::Step2Pending => "step2_pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }

    /// Whether a technician holding this status may begin step 2.
    pub fn qualifies_for_step_two(&self) -> bool {
        matches!(
            self,
            Self::Step1Completed | Self::Step2Pending | Self::Verified
        )
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "step1_completed" => Ok(Self::Step1Completed),
            "step2_pending" => Ok(Self::Step2Pending),
            "verified" => Ok(Self::Verified),
            "failed" => Ok(Self::Failed),
            _ => Err(TypesError::UnknownStatus(s.to_string())),
        }
    }
}

/// A quiz step. Only two exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    One,
    Two,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<Step> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => None,
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(TypesError::InvalidStep(other as u32)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// User-facing trust tier shown to recruiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBadge {
    /// Quiz not yet passed (includes an intermediate technician step).
    Pending,
    /// Quiz passed, awaiting human confirmation.
    QuizPassed,
    /// Quiz passed and confirmed by an administrator.
    FullyVerified,
    /// Most recent attempt failed.
    Failed,
}

impl TrustBadge {
    /// Whether recruiters should treat the candidate as screened.
    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::FullyVerified)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Verification pending",
            Self::QuizPassed => "Quiz passed",
            Self::FullyVerified => "Fully verified",
            Self::Failed => "Verification failed",
        }
    }
}

impl fmt::Display for TrustBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_stored_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Step1Completed).unwrap(),
            "\"step1_completed\""
        );
        assert_eq!(
            "STEP2_PENDING".parse::<VerificationStatus>().unwrap(),
            VerificationStatus::Step2Pending
        );
    }

    #[test]
    fn step_two_qualification() {
        assert!(!VerificationStatus::Pending.qualifies_for_step_two());
        assert!(!VerificationStatus::Failed.qualifies_for_step_two());
        assert!(VerificationStatus::Step1Completed.qualifies_for_step_two());
        assert!(VerificationStatus::Verified.qualifies_for_step_two());
    }

    #[test]
    fn step_rejects_out_of_range_numbers() {
        assert_eq!(Step::try_from(0), Err(TypesError::InvalidStep(0)));
        assert_eq!(Step::try_from(3), Err(TypesError::InvalidStep(3)));
        assert_eq!(Step::try_from(2), Ok(Step::Two));
        assert!(serde_json::from_str::<Step>("3").is_err());
    }

    #[test]
    fn only_fully_verified_is_trusted() {
        assert!(TrustBadge::FullyVerified.is_trusted());
        assert!(!TrustBadge::QuizPassed.is_trusted());
    }
}
