//! Trust badge resolution.
//!
//! Read-only; any display surface may call these freely from any thread.

use veriskill_types::{Role, TrustBadge, UserVerificationRecord, VerificationStatus};

/// Derive the trust tier from a stored status and the admin flag.
///
/// A passed quiz alone is [`TrustBadge::QuizPassed`]; only an administrator's
/// confirmation lifts a verified user to [`TrustBadge::FullyVerified`].
/// `role` does not currently change the outcome.
pub fn resolve(status: VerificationStatus, admin_verified: bool, _role: Role) -> TrustBadge {
    match (status, admin_verified) {
        (VerificationStatus::Failed, _) => TrustBadge::Failed,
        (VerificationStatus::Verified, true) => TrustBadge::FullyVerified,
        (VerificationStatus::Verified, false) => TrustBadge::QuizPassed,
        (
            VerificationStatus::Pending
            | VerificationStatus::Step1Completed
            | VerificationStatus::Step2Pending,
            _,
        ) => TrustBadge::Pending,
    }
}

/// [`resolve`] applied to a whole record.
pub fn resolve_trust_badge(record: &UserVerificationRecord) -> TrustBadge {
    resolve(
        record.verification_status,
        record.admin_verified,
        record.role,
    )
}
