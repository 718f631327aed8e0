//! LMDB implementation of UserStore.
//!
//! Records are bincode-encoded under the raw user id bytes. Every mutation
//! reads, modifies and writes the record inside one write transaction, so an
//! update either commits whole or not at all. Verification writes also check
//! the stored fields against the caller's expectation inside that transaction.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use veriskill_store::{StoreError, UserStore};
use veriskill_types::{UserId, UserVerificationRecord, VerificationUpdate};

use crate::{decode, encode, LmdbError};

pub struct LmdbUserStore {
    pub(crate) env: Arc<Env>,
    pub(crate) users_db: Database<Bytes, Bytes>,
}

impl LmdbUserStore {
    /// Read-modify-write one record in a single write transaction.
    fn modify(
        &self,
        user: &UserId,
        f: impl FnOnce(&mut UserVerificationRecord) -> Result<(), LmdbError>,
    ) -> Result<(), LmdbError> {
        let key = user.as_str().as_bytes();
        let mut wtxn = self.env.write_txn()?;
        let mut record: UserVerificationRecord = match self.users_db.get(&wtxn, key)? {
            Some(bytes) => decode(bytes)?,
            None => return Err(LmdbError::NotFound(user.to_string())),
        };
        f(&mut record)?;
        let bytes = encode(&record)?;
        self.users_db.put(&mut wtxn, key, &bytes)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Number of stored users.
    pub fn user_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.users_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}

impl UserStore for LmdbUserStore {
    fn get_user(&self, user: &UserId) -> Result<UserVerificationRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .users_db
            .get(&rtxn, user.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| StoreError::NotFound(user.to_string()))?;
        Ok(decode(bytes)?)
    }

    fn put_user(&self, record: &UserVerificationRecord) -> Result<(), StoreError> {
        let key = record.user_id.as_str().as_bytes();
        let bytes = encode(record)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .users_db
            .get(&wtxn, key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(record.user_id.to_string()));
        }
        self.users_db
            .put(&mut wtxn, key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(user = %record.user_id, "user record created");
        Ok(())
    }

    fn exists(&self, user: &UserId) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self
            .users_db
            .get(&rtxn, user.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .is_some())
    }

    fn update_verification(
        &self,
        user: &UserId,
        expected: &UserVerificationRecord,
        update: &VerificationUpdate,
    ) -> Result<(), StoreError> {
        self.modify(user, |record| {
            expect_unchanged(record, expected)?;
            record.apply(update);
            Ok(())
        })?;
        Ok(())
    }

    fn restore_verification(
        &self,
        prior: &UserVerificationRecord,
        expected: &UserVerificationRecord,
    ) -> Result<(), StoreError> {
        self.modify(&prior.user_id, |record| {
            expect_unchanged(record, expected)?;
            record.restore_from(prior);
            Ok(())
        })?;
        Ok(())
    }

    fn set_admin_verified(&self, user: &UserId, verified: bool) -> Result<(), StoreError> {
        self.modify(user, |record| {
            record.admin_verified = verified;
            Ok(())
        })?;
        Ok(())
    }
}

/// Abort the transaction if another writer changed the verification fields.
fn expect_unchanged(
    stored: &UserVerificationRecord,
    expected: &UserVerificationRecord,
) -> Result<(), LmdbError> {
    if stored.same_verification(expected) {
        Ok(())
    } else {
        Err(LmdbError::Conflict(stored.user_id.to_string()))
    }
}
