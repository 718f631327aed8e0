use thiserror::Error;
use veriskill_store::StoreError;
use veriskill_types::{QuestionId, Role, Step, UserId, VerificationStatus};

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("no questions available for role {role} step {step}")]
    NoQuestionsAvailable { role: Role, step: Step },

    #[error("a {role} with status {status} cannot begin step {requested}")]
    InvalidStepRequest {
        role: Role,
        status: VerificationStatus,
        requested: Step,
    },

    #[error("submission incomplete: {answered} of {total} questions answered")]
    IncompleteSubmission { answered: usize, total: usize },

    #[error("verification record for user {user} was changed by another writer")]
    ConcurrentUpdate { user: UserId },

    #[error("verification update for user {user} did not persist as a unit: {detail}")]
    PersistenceInconsistency { user: UserId, detail: String },

    #[error("question {0} is not part of this session")]
    UnknownQuestion(QuestionId),

    #[error("option {index} is out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        options: usize,
    },

    #[error("session belongs to user {expected}, not {actual}")]
    SessionMismatch { expected: UserId, actual: UserId },

    #[error("retry not yet allowed: {remaining_secs}s remaining")]
    RetryCooldown { remaining_secs: u64 },

    #[error("question bank error: {0}")]
    QuestionBank(StoreError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
