//! LMDB implementation of QuestionProvider.
//!
//! Each (role, step) question set is one bincode-encoded `Vec<Question>`
//! under the key `role_bytes ++ 0x00 ++ step`.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use veriskill_store::{QuestionProvider, StoreError};
use veriskill_types::Question;

use crate::{decode, encode, LmdbError};

pub struct LmdbQuestionStore {
    pub(crate) env: Arc<Env>,
    pub(crate) questions_db: Database<Bytes, Bytes>,
}

/// Build key `role_bytes ++ 0x00 ++ step`.
fn set_key(role: &str, step: u8) -> Vec<u8> {
    let mut key = Vec::with_capacity(role.len() + 2);
    key.extend_from_slice(role.as_bytes());
    key.push(0);
    key.push(step);
    key
}

impl LmdbQuestionStore {
    /// Replace the question set for (role, step).
    pub fn put_questions(
        &self,
        role: &str,
        step: u8,
        questions: &[Question],
    ) -> Result<(), StoreError> {
        let bytes = encode(&questions)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.questions_db
            .put(&mut wtxn, &set_key(role, step), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::info!(role, step, count = questions.len(), "question set stored");
        Ok(())
    }
}

impl QuestionProvider for LmdbQuestionStore {
    fn get_questions(&self, role: &str, step: u8) -> Result<Vec<Question>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .questions_db
            .get(&rtxn, &set_key(role, step))
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(decode(bytes)?),
            None => Ok(Vec::new()),
        }
    }
}
