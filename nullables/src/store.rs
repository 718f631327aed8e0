//! Nullable user store: thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use veriskill_store::{StoreError, UserStore};
use veriskill_types::{UserId, UserVerificationRecord, VerificationUpdate};

/// A fault to inject into `update_verification`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteFault {
    /// Reject the write with a backend error; nothing is written.
    Fail,
    /// Write only the score fields and report success, once.
    PartialOnce,
    /// Write only the score fields and report success, every time.
    PartialAlways,
}

/// An in-memory user record store for testing.
/// Thread-safe for use from multiple threads.
pub struct NullUserStore {
    users: Mutex<HashMap<UserId, UserVerificationRecord>>,
    fault: Mutex<Option<WriteFault>>,
    updates: Mutex<u64>,
}

impl NullUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fault: Mutex::new(None),
            updates: Mutex::new(0),
        }
    }

    /// A store pre-populated with `records`.
    pub fn with_users(records: impl IntoIterator<Item = UserVerificationRecord>) -> Self {
        let store = Self::new();
        {
            let mut users = store.users.lock().unwrap();
            for record in records {
                users.insert(record.user_id.clone(), record);
            }
        }
        store
    }

    /// Inject a fault into subsequent `update_verification` calls.
    pub fn inject_fault(&self, fault: WriteFault) {
        *self.fault.lock().unwrap() = Some(fault);
    }

    /// Number of `update_verification` calls that wrote anything.
    pub fn update_count(&self) -> u64 {
        *self.updates.lock().unwrap()
    }

    /// Snapshot of a record, bypassing the trait.
    pub fn record(&self, user: &UserId) -> Option<UserVerificationRecord> {
        self.users.lock().unwrap().get(user).cloned()
    }
}

impl Default for NullUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for NullUserStore {
    fn get_user(&self, user: &UserId) -> Result<UserVerificationRecord, StoreError> {
        self.users
            .lock()
            .unwrap()
            .get(user)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user.to_string()))
    }

    fn put_user(&self, record: &UserVerificationRecord) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&record.user_id) {
            return Err(StoreError::Duplicate(record.user_id.to_string()));
        }
        users.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    fn exists(&self, user: &UserId) -> Result<bool, StoreError> {
        Ok(self.users.lock().unwrap().contains_key(user))
    }

    fn update_verification(
        &self,
        user: &UserId,
        expected: &UserVerificationRecord,
        update: &VerificationUpdate,
    ) -> Result<(), StoreError> {
        let fault = {
            let mut slot = self.fault.lock().unwrap();
            let current = *slot;
            if current == Some(WriteFault::PartialOnce) {
                *slot = None;
            }
            current
        };

        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(user)
            .ok_or_else(|| StoreError::NotFound(user.to_string()))?;
        if !record.same_verification(expected) {
            return Err(StoreError::Conflict(user.to_string()));
        }

        match fault {
            Some(WriteFault::Fail) => {
                return Err(StoreError::Backend("injected write failure".into()));
            }
            Some(WriteFault::PartialOnce | WriteFault::PartialAlways) => {
                record.quiz_score = update.quiz_score;
                record.total_questions = update.total_questions;
            }
            None => record.apply(update),
        }
        *self.updates.lock().unwrap() += 1;
        Ok(())
    }

    fn restore_verification(
        &self,
        prior: &UserVerificationRecord,
        expected: &UserVerificationRecord,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(&prior.user_id)
            .ok_or_else(|| StoreError::NotFound(prior.user_id.to_string()))?;
        if !record.same_verification(expected) {
            return Err(StoreError::Conflict(prior.user_id.to_string()));
        }
        record.restore_from(prior);
        Ok(())
    }

    fn set_admin_verified(&self, user: &UserId, verified: bool) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(user)
            .ok_or_else(|| StoreError::NotFound(user.to_string()))?;
        record.admin_verified = verified;
        Ok(())
    }
}
