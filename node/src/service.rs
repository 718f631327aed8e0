//! LMDB-backed verification service.
//!
//! Opens the environment named by [`ServiceConfig`] and builds the engine
//! (orchestrator and admin actions) on top of its stores.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use veriskill_store::{QuestionProvider, UserStore};
use veriskill_store_lmdb::{LmdbEnvironment, LmdbQuestionStore};
use veriskill_types::{Question, Role, Step, UserId};
use veriskill_verification::{AdminActions, SubmissionOutcome, VerificationOrchestrator};

use crate::{NodeError, ServiceConfig};

/// The engine wired to durable storage.
pub struct VerificationService {
    orchestrator: VerificationOrchestrator,
    admin: AdminActions,
    questions: Arc<LmdbQuestionStore>,
}

impl VerificationService {
    /// Open (or create) the data directory and build the engine.
    pub fn open(config: &ServiceConfig) -> Result<Self, NodeError> {
        let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())?;
        let users: Arc<dyn UserStore> = Arc::new(env.user_store());
        let questions = Arc::new(env.question_store());
        let provider: Arc<dyn QuestionProvider> = questions.clone();

        let orchestrator =
            VerificationOrchestrator::new(Arc::clone(&users), provider, config.verification.clone());
        let admin = AdminActions::new(users);

        tracing::info!(
            data_dir = %config.data_dir.display(),
            pass_threshold_bps = config.verification.pass_threshold_bps,
            enforce_retry_cooldown = config.verification.enforce_retry_cooldown,
            "verification service opened"
        );

        Ok(Self {
            orchestrator,
            admin,
            questions,
        })
    }

    pub fn orchestrator(&self) -> &VerificationOrchestrator {
        &self.orchestrator
    }

    pub fn admin(&self) -> &AdminActions {
        &self.admin
    }

    /// Replace the question set for (role, step) with the JSON array at `path`.
    ///
    /// Sets are stored under the role's question bank, so importing for an
    /// aspirant writes the technician set. Returns the number of questions stored.
    pub fn import_questions(&self, role: Role, step: Step, path: &Path) -> Result<usize, NodeError> {
        let content = std::fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&content)
            .map_err(|e| NodeError::InvalidQuestionSet(format!("{}: {e}", path.display())))?;
        self.store_questions(role, step, &questions)?;
        Ok(questions.len())
    }

    /// Validate and store a question set for (role, step).
    pub fn store_questions(
        &self,
        role: Role,
        step: Step,
        questions: &[Question],
    ) -> Result<(), NodeError> {
        validate_question_set(questions)?;
        self.questions
            .put_questions(role.question_role().as_str(), step.number(), questions)?;
        Ok(())
    }

    /// Run one complete attempt: begin the step, answer every question in
    /// order with `answers[i]`, and submit.
    ///
    /// `answers` must hold exactly one entry per question.
    pub fn attempt(
        &self,
        user: &UserId,
        step: Step,
        answers: &[usize],
    ) -> Result<SubmissionOutcome, NodeError> {
        let mut session = self.orchestrator.begin_step(user, step)?;
        let expected = session.questions().len();
        if answers.len() != expected {
            return Err(NodeError::AnswerCount {
                expected,
                given: answers.len(),
            });
        }
        let ids: Vec<_> = session.questions().iter().map(|q| q.id.clone()).collect();
        for (id, &choice) in ids.iter().zip(answers) {
            session.record_answer(id, choice)?;
        }
        Ok(self.orchestrator.submit(user, &session)?)
    }
}

/// Every question needs an id unique within the set, at least two options
/// and at least one correct option.
fn validate_question_set(questions: &[Question]) -> Result<(), NodeError> {
    if questions.is_empty() {
        return Err(NodeError::InvalidQuestionSet("set is empty".into()));
    }
    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(&q.id) {
            return Err(NodeError::InvalidQuestionSet(format!("duplicate id {}", q.id)));
        }
        if q.options.len() < 2 {
            return Err(NodeError::InvalidQuestionSet(format!(
                "question {} has {} option(s)",
                q.id,
                q.options.len()
            )));
        }
        if !q.options.iter().any(|o| o.is_correct) {
            return Err(NodeError::InvalidQuestionSet(format!(
                "question {} has no correct option",
                q.id
            )));
        }
    }
    Ok(())
}
