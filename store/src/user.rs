//! User record storage trait.

use crate::StoreError;
use veriskill_types::{UserId, UserVerificationRecord, VerificationUpdate};

/// Trait for storing user verification records.
///
/// Implementations must be safe to share across threads. Each method is its
/// own transaction: `update_verification` writes every field of the update or
/// none of them, and `set_admin_verified` writes only the admin flag, so the
/// two never overwrite each other's fields.
pub trait UserStore: Send + Sync {
    /// Fetch a user's record. Missing users are [`StoreError::NotFound`].
    fn get_user(&self, user: &UserId) -> Result<UserVerificationRecord, StoreError>;

    /// Insert a newly registered user. Existing users are [`StoreError::Duplicate`].
    fn put_user(&self, record: &UserVerificationRecord) -> Result<(), StoreError>;

    /// Whether a record exists for `user`.
    fn exists(&self, user: &UserId) -> Result<bool, StoreError>;

    /// Atomically apply a quiz submission's fields to an existing record.
    ///
    /// The write happens only if the stored verification fields still equal
    /// `expected`'s, checked inside the same transaction. Otherwise nothing is
    /// written and [`StoreError::Conflict`] is returned.
    fn update_verification(
        &self,
        user: &UserId,
        expected: &UserVerificationRecord,
        update: &VerificationUpdate,
    ) -> Result<(), StoreError>;

    /// Atomically put the verification fields of `prior` back, undoing an
    /// update that did not land as a unit. The admin flag is left as stored.
    ///
    /// Like `update_verification`, this writes only while the stored fields
    /// still equal `expected`'s, so a later writer's result is never undone.
    fn restore_verification(
        &self,
        prior: &UserVerificationRecord,
        expected: &UserVerificationRecord,
    ) -> Result<(), StoreError>;

    /// Set the independent admin verification flag.
    fn set_admin_verified(&self, user: &UserId, verified: bool) -> Result<(), StoreError>;
}
