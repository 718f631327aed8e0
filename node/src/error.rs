use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("verification error: {0}")]
    Verification(#[from] veriskill_verification::VerificationError),

    #[error("store error: {0}")]
    Store(#[from] veriskill_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] veriskill_store_lmdb::LmdbError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging already initialised: {0}")]
    Logging(String),

    #[error("invalid question set: {0}")]
    InvalidQuestionSet(String),

    #[error("expected {expected} answer(s), got {given}")]
    AnswerCount { expected: usize, given: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
