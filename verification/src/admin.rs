//! Admin action surface: human confirmation of quiz-passed users.

use std::sync::Arc;

use veriskill_store::UserStore;
use veriskill_types::{TrustBadge, UserId};

use crate::badge::resolve_trust_badge;
use crate::error::VerificationError;

/// Flips the admin verification flag after human review.
///
/// Touches only `admin_verified`, never the quiz fields, so it can run
/// alongside a user's own quiz flow without coordination.
pub struct AdminActions {
    users: Arc<dyn UserStore>,
}

impl AdminActions {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Set or clear the flag and return the badge the user now holds.
    pub fn set_admin_verified(
        &self,
        user: &UserId,
        verified: bool,
    ) -> Result<TrustBadge, VerificationError> {
        self.users.set_admin_verified(user, verified)?;
        let record = self.users.get_user(user)?;
        let badge = resolve_trust_badge(&record);
        tracing::info!(
            user = %user,
            admin_verified = verified,
            status = %record.verification_status,
            badge = ?badge,
            "admin verification updated"
        );
        Ok(badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriskill_nullables::NullUserStore;
    use veriskill_types::{Role, UserVerificationRecord, VerificationStatus};

    fn uid() -> UserId {
        UserId::new("u-1").unwrap()
    }

    #[test]
    fn confirming_a_quiz_passed_user_fully_verifies() {
        let mut record = UserVerificationRecord::register(uid(), Role::Workshop, None, None);
        record.verification_status = VerificationStatus::Verified;
        let users = Arc::new(NullUserStore::with_users([record.clone()]));
        let admin = AdminActions::new(users.clone());

        assert_eq!(admin.set_admin_verified(&uid(), true).unwrap(), TrustBadge::FullyVerified);
        assert_eq!(admin.set_admin_verified(&uid(), false).unwrap(), TrustBadge::QuizPassed);

        let stored = users.record(&uid()).unwrap();
        assert_eq!(stored.verification_status, record.verification_status);
        assert_eq!(stored.quiz_score, record.quiz_score);
    }

    #[test]
    fn confirming_a_pending_user_stays_pending() {
        let record = UserVerificationRecord::register(uid(), Role::Technician, None, None);
        let users = Arc::new(NullUserStore::with_users([record]));
        let admin = AdminActions::new(users);
        assert_eq!(admin.set_admin_verified(&uid(), true).unwrap(), TrustBadge::Pending);
    }

    #[test]
    fn unknown_user_errors() {
        let admin = AdminActions::new(Arc::new(NullUserStore::new()));
        assert!(matches!(
            admin.set_admin_verified(&uid(), true),
            Err(VerificationError::Store(_))
        ));
    }
}
