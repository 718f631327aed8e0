//! The user verification record and its atomic update.

use crate::{Domain, Role, Step, Timestamp, TypesError, VehicleCategory, VerificationStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque user identifier assigned by the user record store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a user id from a non-empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(TypesError::InvalidUserId(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Verification fields of a user profile.
///
/// Owned by the user record store. The verification engine reads it and
/// writes it only through [`VerificationUpdate`]; `admin_verified` is written
/// only by the admin action surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVerificationRecord {
    pub user_id: UserId,
    pub role: Role,
    pub domain: Option<Domain>,
    pub vehicle_category: Option<VehicleCategory>,
    pub verification_status: VerificationStatus,
    /// Highest step number attempted; 0 before the first submission.
    pub verification_step: u8,
    /// Correct answers on the most recent attempt.
    pub quiz_score: u32,
    /// Question count of the most recent attempt.
    pub total_questions: u32,
    pub admin_verified: bool,
    /// When the most recent attempt was submitted.
    pub last_attempt_at: Option<Timestamp>,
}

impl UserVerificationRecord {
    /// A freshly registered user: pending, no attempts, not admin verified.
    pub fn register(
        user_id: UserId,
        role: Role,
        domain: Option<Domain>,
        vehicle_category: Option<VehicleCategory>,
    ) -> Self {
        Self {
            user_id,
            role,
            domain,
            vehicle_category,
            verification_status: VerificationStatus::Pending,
            verification_step: 0,
            quiz_score: 0,
            total_questions: 0,
            admin_verified: false,
            last_attempt_at: None,
        }
    }

    /// Apply a verification update to this record in place.
    ///
    /// Leaves `role`, `domain`, `vehicle_category` and `admin_verified` untouched.
    pub fn apply(&mut self, update: &VerificationUpdate) {
        self.verification_status = update.verification_status;
        self.verification_step = update.verification_step.number();
        self.quiz_score = update.quiz_score;
        self.total_questions = update.total_questions;
        self.last_attempt_at = Some(update.attempted_at);
    }

    /// Copy the verification fields of `prior` onto this record.
    ///
    /// Used to roll back a failed update; the admin flag is left alone.
    pub fn restore_from(&mut self, prior: &UserVerificationRecord) {
        self.verification_status = prior.verification_status;
        self.verification_step = prior.verification_step;
        self.quiz_score = prior.quiz_score;
        self.total_questions = prior.total_questions;
        self.last_attempt_at = prior.last_attempt_at;
    }

    /// Whether every field written by `update` holds the value it carries.
    pub fn reflects(&self, update: &VerificationUpdate) -> bool {
        self.verification_status == update.verification_status
            && self.verification_step == update.verification_step.number()
            && self.quiz_score == update.quiz_score
            && self.total_questions == update.total_questions
            && self.last_attempt_at == Some(update.attempted_at)
    }

    /// Whether the fields a submission writes are equal on both records.
    ///
    /// Identity and the admin flag are not compared.
    pub fn same_verification(&self, other: &UserVerificationRecord) -> bool {
        self.verification_status == other.verification_status
            && self.verification_step == other.verification_step
            && self.quiz_score == other.quiz_score
            && self.total_questions == other.total_questions
            && self.last_attempt_at == other.last_attempt_at
    }

    /// Whether each verification field holds either `prior`'s value or the
    /// one `update` carries, as left by `update` landing only in part.
    pub fn is_partial_of(&self, prior: &UserVerificationRecord, update: &VerificationUpdate) -> bool {
        (self.verification_status == prior.verification_status
            || self.verification_status == update.verification_status)
            && (self.verification_step == prior.verification_step
                || self.verification_step == update.verification_step.number())
            && (self.quiz_score == prior.quiz_score || self.quiz_score == update.quiz_score)
            && (self.total_questions == prior.total_questions
                || self.total_questions == update.total_questions)
            && (self.last_attempt_at == prior.last_attempt_at
                || self.last_attempt_at == Some(update.attempted_at))
    }
}

/// The fields written together by one quiz submission.
///
/// Stores must apply all of them in a single atomic operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUpdate {
    pub verification_status: VerificationStatus,
    pub verification_step: Step,
    pub quiz_score: u32,
    pub total_questions: u32,
    pub attempted_at: Timestamp,
}
