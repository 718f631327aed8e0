//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbError, LmdbQuestionStore, LmdbUserStore};

/// Default map size: 256 MiB.
pub const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

const MAX_DBS: u32 = 4;
const USERS_DB: &str = "users";
const QUESTIONS_DB: &str = "questions";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    users_db: Database<Bytes, Bytes>,
    questions_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in the directory `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per directory by this process
        // and shared through `Arc`; nothing else maps the same files.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let users_db = env.create_database(&mut wtxn, Some(USERS_DB))?;
        let questions_db = env.create_database(&mut wtxn, Some(QUESTIONS_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            users_db,
            questions_db,
        })
    }

    /// User record store backed by this environment.
    pub fn user_store(&self) -> LmdbUserStore {
        LmdbUserStore {
            env: Arc::clone(&self.env),
            users_db: self.users_db,
        }
    }

    /// Question bank backed by this environment.
    pub fn question_store(&self) -> LmdbQuestionStore {
        LmdbQuestionStore {
            env: Arc::clone(&self.env),
            questions_db: self.questions_db,
        }
    }
}
