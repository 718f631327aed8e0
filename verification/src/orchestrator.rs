//! Verification orchestrator: connects question loading, scoring, the step
//! policy and the user store into one end-to-end attempt.
//!
//! A step is driven in two calls: [`VerificationOrchestrator::begin_step`]
//! hands out a [`QuizSession`] for the caller to fill in, and
//! [`VerificationOrchestrator::submit`] scores it and commits the resulting
//! transition. Nothing is written before `submit`, so dropping a session is
//! always safe.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use veriskill_store::{QuestionProvider, StoreError, UserStore};
use veriskill_types::{
    Clock, Domain, Role, Step, SystemClock, Timestamp, TrustBadge, UserId,
    UserVerificationRecord, VehicleCategory, VerificationParams, VerificationStatus,
    VerificationUpdate,
};

use crate::badge::resolve_trust_badge;
use crate::error::VerificationError;
use crate::outcomes::{Progress, SubmissionOutcome};
use crate::policy;
use crate::session::{QuizSession, Score};

/// Drives users through their quiz steps.
pub struct VerificationOrchestrator {
    users: Arc<dyn UserStore>,
    questions: Arc<dyn QuestionProvider>,
    clock: Arc<dyn Clock>,
    params: VerificationParams,
    /// One lock per user with a submission in flight.
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl VerificationOrchestrator {
    pub fn new(
        users: Arc<dyn UserStore>,
        questions: Arc<dyn QuestionProvider>,
        params: VerificationParams,
    ) -> Self {
        Self {
            users,
            questions,
            clock: Arc::new(SystemClock),
            params,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the wall clock, e.g. with a deterministic one in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// Create the record for a newly registered user: pending, step 0.
    pub fn register(
        &self,
        user: UserId,
        role: Role,
        domain: Option<Domain>,
        vehicle_category: Option<VehicleCategory>,
    ) -> Result<UserVerificationRecord, VerificationError> {
        let record = UserVerificationRecord::register(user, role, domain, vehicle_category);
        self.users.put_user(&record)?;
        tracing::info!(
            user = %record.user_id,
            role = %role,
            domain = ?domain,
            "user registered for verification"
        );
        Ok(record)
    }

    /// Start a quiz step for a user.
    ///
    /// Step 2 is refused unless the user is a technician who has completed
    /// step 1 (or is already verified). When retry enforcement is on, a
    /// failed user must also wait out the cooldown.
    pub fn begin_step(&self, user: &UserId, step: Step) -> Result<QuizSession, VerificationError> {
        let record = self.users.get_user(user)?;

        if !policy::may_begin(record.role, record.verification_status, step) {
            tracing::debug!(
                user = %user,
                role = %record.role,
                status = %record.verification_status,
                step = %step,
                "step request rejected"
            );
            return Err(VerificationError::InvalidStepRequest {
                role: record.role,
                status: record.verification_status,
                requested: step,
            });
        }

        self.check_retry_cooldown(&record)?;

        let session = QuizSession::load(
            self.questions.as_ref(),
            record.user_id.clone(),
            record.role,
            step,
        )?;
        tracing::debug!(
            user = %user,
            step = %step,
            questions = session.questions().len(),
            "quiz step started"
        );
        Ok(session)
    }

    /// Score a completed session and commit the resulting transition.
    ///
    /// Incomplete sessions are rejected before anything is read or written.
    /// The status, step, score and question count are written in one store
    /// update while holding the user's lock, so concurrent submissions for
    /// the same user cannot interleave. Submitting the same session twice
    /// re-derives and re-writes the same values.
    pub fn submit(
        &self,
        user: &UserId,
        session: &QuizSession,
    ) -> Result<SubmissionOutcome, VerificationError> {
        if session.user() != user {
            return Err(VerificationError::SessionMismatch {
                expected: session.user().clone(),
                actual: user.clone(),
            });
        }
        if !session.is_complete() {
            return Err(VerificationError::IncompleteSubmission {
                answered: session.answered_count(),
                total: session.questions().len(),
            });
        }

        let lock = self.user_lock(user);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.score_and_commit(user, session)
        };
        self.release_user_lock(user, lock);
        result
    }

    /// Where a user stands: status, remaining steps and badge.
    pub fn progress(&self, user: &UserId) -> Result<Progress, VerificationError> {
        let record = self.users.get_user(user)?;
        let retry_available_at = match (record.verification_status, record.last_attempt_at) {
            (VerificationStatus::Failed, Some(at)) => Some(Timestamp::new(
                at.as_secs().saturating_add(self.params.retry_cooldown_secs),
            )),
            _ => None,
        };
        Ok(Progress {
            status: record.verification_status,
            step: record.verification_step,
            required_steps: policy::required_steps(record.role, record.domain),
            next_step: policy::next_step(record.role, record.domain, record.verification_status),
            badge: resolve_trust_badge(&record),
            last_score: record
                .last_attempt_at
                .map(|_| (record.quiz_score, record.total_questions)),
            retry_available_at,
        })
    }

    /// The user's current trust badge.
    pub fn trust_badge(&self, user: &UserId) -> Result<TrustBadge, VerificationError> {
        Ok(resolve_trust_badge(&self.users.get_user(user)?))
    }

    fn score_and_commit(
        &self,
        user: &UserId,
        session: &QuizSession,
    ) -> Result<SubmissionOutcome, VerificationError> {
        let prior = self.users.get_user(user)?;
        let score = session.score();

        // The record may have moved on since the session was handed out.
        if !policy::may_begin(prior.role, prior.verification_status, session.step())
            && !records_attempt(&prior, session.step(), score)
        {
            tracing::warn!(
                user = %user,
                status = %prior.verification_status,
                step = %session.step(),
                "stale session rejected"
            );
            return Err(VerificationError::InvalidStepRequest {
                role: prior.role,
                status: prior.verification_status,
                requested: session.step(),
            });
        }

        let passed = self.params.meets_threshold(score.correct, score.total);
        let next_status = policy::next_status(prior.role, prior.domain, session.step(), passed);
        let has_next_step = policy::has_next_step(prior.role, next_status);

        let update = VerificationUpdate {
            verification_status: next_status,
            verification_step: session.step(),
            quiz_score: score.correct,
            total_questions: score.total,
            attempted_at: self.clock.now(),
        };
        self.commit(&prior, &update)?;

        tracing::info!(
            user = %user,
            role = %prior.role,
            step = %session.step(),
            correct = score.correct,
            total = score.total,
            passed,
            from = %prior.verification_status,
            to = %next_status,
            "quiz step submitted"
        );

        Ok(SubmissionOutcome {
            passed,
            correct: score.correct,
            total: score.total,
            percentage: score.percentage(),
            next_status,
            has_next_step,
            next_step: if has_next_step { session.step().next() } else { None },
        })
    }

    /// Write `update` and confirm it landed whole.
    ///
    /// Every write is conditional on the stored verification fields, so a
    /// record changed by another writer is left with that writer's result and
    /// reported as [`VerificationError::ConcurrentUpdate`]. A read-back holding
    /// a mix of prior and new values means the store applied the update in
    /// part: it is re-applied once, and if it still does not land the prior
    /// values are restored and the inconsistency is escalated.
    fn commit(
        &self,
        prior: &UserVerificationRecord,
        update: &VerificationUpdate,
    ) -> Result<(), VerificationError> {
        let user = &prior.user_id;

        self.write(prior, update)?;
        let stored = self.users.get_user(user)?;
        if stored.reflects(update) {
            return Ok(());
        }
        if !stored.is_partial_of(prior, update) {
            return Err(superseded(user));
        }

        tracing::warn!(user = %user, "verification update landed partially, re-applying");
        self.write(&stored, update)?;
        let stored = self.users.get_user(user)?;
        if stored.reflects(update) {
            return Ok(());
        }
        if !stored.is_partial_of(prior, update) {
            return Err(superseded(user));
        }

        let detail = format!(
            "wrote status={} step={} score={}/{}, read back status={} step={} score={}/{}",
            update.verification_status,
            update.verification_step,
            update.quiz_score,
            update.total_questions,
            stored.verification_status,
            stored.verification_step,
            stored.quiz_score,
            stored.total_questions,
        );
        tracing::error!(user = %user, %detail, "verification update is not atomic, rolling back");
        match self.users.restore_verification(prior, &stored) {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                tracing::warn!(user = %user, "record changed before rollback, keeping the newer write");
            }
            Err(e) => {
                tracing::error!(user = %user, error = %e, "rollback of partial verification update failed");
            }
        }
        Err(VerificationError::PersistenceInconsistency {
            user: user.clone(),
            detail,
        })
    }

    /// Apply `update` only while the stored fields still match `expected`.
    fn write(
        &self,
        expected: &UserVerificationRecord,
        update: &VerificationUpdate,
    ) -> Result<(), VerificationError> {
        match self
            .users
            .update_verification(&expected.user_id, expected, update)
        {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict(_)) => Err(superseded(&expected.user_id)),
            Err(e) => Err(e.into()),
        }
    }

    fn check_retry_cooldown(&self, record: &UserVerificationRecord) -> Result<(), VerificationError> {
        if !self.params.enforce_retry_cooldown
            || record.verification_status != VerificationStatus::Failed
        {
            return Ok(());
        }
        let Some(last) = record.last_attempt_at else {
            return Ok(());
        };
        let remaining_secs = last.remaining(self.params.retry_cooldown_secs, self.clock.now());
        if remaining_secs > 0 {
            return Err(VerificationError::RetryCooldown { remaining_secs });
        }
        Ok(())
    }

    fn user_lock(&self, user: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(user.clone()).or_default().clone()
    }

    /// Drop the user's lock entry once no other submission holds it.
    fn release_user_lock(&self, user: &UserId, lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        // Only the map's own reference is left.
        if locks.get(user).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(user);
        }
    }
}

/// Whether `record` already holds the result of this attempt at `step`.
fn records_attempt(record: &UserVerificationRecord, step: Step, score: Score) -> bool {
    record.last_attempt_at.is_some()
        && record.verification_step == step.number()
        && record.quiz_score == score.correct
        && record.total_questions == score.total
}

fn superseded(user: &UserId) -> VerificationError {
    tracing::warn!(user = %user, "verification record changed by another writer, keeping its result");
    VerificationError::ConcurrentUpdate { user: user.clone() }
}
