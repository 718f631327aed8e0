//! Quiz session: answers accumulated against a fixed question set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use veriskill_store::QuestionProvider;
use veriskill_types::params::percentage;
use veriskill_types::{Question, QuestionId, Role, Step, UserId};

use crate::error::VerificationError;

/// Raw result of scoring a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Rounded percentage, for display only. Pass/fail uses the exact ratio.
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

/// One quiz attempt in progress.
///
/// Created by the orchestrator when a step begins and discarded after
/// submission. The question set never changes once loaded; each question
/// holds at most one answer, the most recent.
#[derive(Clone, Debug)]
pub struct QuizSession {
    user: UserId,
    role: Role,
    step: Step,
    questions: Vec<Question>,
    answers: HashMap<QuestionId, usize>,
}

impl QuizSession {
    /// Load the question set for `role` at `step`.
    ///
    /// Questions are requested under the role's question bank name, so
    /// aspirants receive technician questions. An empty set is
    /// [`VerificationError::NoQuestionsAvailable`]; nothing is retried.
    pub fn load<P>(
        provider: &P,
        user: UserId,
        role: Role,
        step: Step,
    ) -> Result<Self, VerificationError>
    where
        P: QuestionProvider + ?Sized,
    {
        let questions = provider
            .get_questions(role.question_role().as_str(), step.number())
            .map_err(VerificationError::QuestionBank)?;
        if questions.is_empty() {
            return Err(VerificationError::NoQuestionsAvailable { role, step });
        }
        Ok(Self::new(user, role, step, questions))
    }

    pub(crate) fn new(user: UserId, role: Role, step: Step, questions: Vec<Question>) -> Self {
        Self {
            user,
            role,
            step,
            questions,
            answers: HashMap::new(),
        }
    }

    /// Record the selected option for a question, replacing any earlier answer.
    pub fn record_answer(
        &mut self,
        question: &QuestionId,
        option_index: usize,
    ) -> Result<(), VerificationError> {
        let q = self
            .questions
            .iter()
            .find(|q| &q.id == question)
            .ok_or_else(|| VerificationError::UnknownQuestion(question.clone()))?;
        if option_index >= q.options.len() {
            return Err(VerificationError::OptionOutOfRange {
                question: question.clone(),
                index: option_index,
                options: q.options.len(),
            });
        }
        self.answers.insert(question.clone(), option_index);
        Ok(())
    }

    /// Whether every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.questions
            .iter()
            .all(|q| self.answers.contains_key(&q.id))
    }

    /// Count correct answers. Unanswered questions count as wrong, so a
    /// partial score is available at any time.
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id).is_some_and(|&i| q.is_correct(i)))
            .count();
        Score {
            correct: correct as u32,
            total: self.questions.len() as u32,
        }
    }

    /// Number of questions with an answer.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// Ids of unanswered questions, in question order.
    pub fn unanswered(&self) -> Vec<&QuestionId> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| &q.id)
            .collect()
    }

    pub fn answer_for(&self, question: &QuestionId) -> Option<usize> {
        self.answers.get(question).copied()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn step(&self) -> Step {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriskill_nullables::questions::{correct_index, wrong_index};
    use veriskill_nullables::NullQuestionBank;

    fn user() -> UserId {
        UserId::new("u-1").unwrap()
    }

    fn session_with(count: usize) -> (QuizSession, Vec<Question>) {
        let bank = NullQuestionBank::new();
        let questions = bank.generate("sales", 1, count);
        let session = QuizSession::load(&bank, user(), Role::Sales, Step::One).unwrap();
        (session, questions)
    }

    #[test]
    fn load_requests_technician_bank_for_aspirants() {
        let bank = NullQuestionBank::new();
        bank.generate("technician", 1, 3);
        let session = QuizSession::load(&bank, user(), Role::Aspirant, Step::One).unwrap();
        assert_eq!(session.questions().len(), 3);
        assert_eq!(session.role(), Role::Aspirant);
        assert_eq!(bank.requests(), vec![("technician".to_string(), 1)]);
    }

    #[test]
    fn empty_bank_is_no_questions_available() {
        let bank = NullQuestionBank::new();
        let err = QuizSession::load(&bank, user(), Role::Workshop, Step::One).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::NoQuestionsAvailable {
                role: Role::Workshop,
                step: Step::One
            }
        ));
    }

    #[test]
    fn provider_failure_is_surfaced() {
        let bank = NullQuestionBank::new();
        bank.set_unavailable(true);
        let err = QuizSession::load(&bank, user(), Role::Sales, Step::One).unwrap_err();
        assert!(matches!(err, VerificationError::QuestionBank(_)));
    }

    #[test]
    fn completes_only_when_every_question_answered() {
        let (mut session, questions) = session_with(3);
        assert!(!session.is_complete());
        for q in &questions[..2] {
            session.record_answer(&q.id, 0).unwrap();
        }
        assert!(!session.is_complete());
        assert_eq!(session.answered_count(), 2);
        assert_eq!(session.unanswered(), vec![&questions[2].id]);
        session.record_answer(&questions[2].id, 1).unwrap();
        assert!(session.is_complete());
    }

    #[test]
    fn last_answer_wins() {
        let (mut session, questions) = session_with(1);
        let id = &questions[0].id;
        session.record_answer(id, wrong_index(0)).unwrap();
        assert_eq!(session.score().correct, 0);
        session.record_answer(id, correct_index(0)).unwrap();
        assert_eq!(session.answer_for(id), Some(correct_index(0)));
        assert_eq!(session.score(), Score { correct: 1, total: 1 });
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn rejects_unknown_question_and_out_of_range_option() {
        let (mut session, questions) = session_with(2);
        assert!(matches!(
            session.record_answer(&QuestionId::new("nope"), 0),
            Err(VerificationError::UnknownQuestion(_))
        ));
        assert!(matches!(
            session.record_answer(&questions[0].id, 4),
            Err(VerificationError::OptionOutOfRange {
                index: 4,
                options: 4,
                ..
            })
        ));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn partial_score_counts_unanswered_as_wrong() {
        let (mut session, questions) = session_with(4);
        session.record_answer(&questions[0].id, correct_index(0)).unwrap();
        session.record_answer(&questions[1].id, correct_index(1)).unwrap();
        let score = session.score();
        assert_eq!(score, Score { correct: 2, total: 4 });
        assert_eq!(score.percentage(), 50);
    }
}
