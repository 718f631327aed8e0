//! Nullable question bank: canned question sets keyed by (role, step).

use std::collections::HashMap;
use std::sync::Mutex;

use veriskill_store::{QuestionProvider, StoreError};
use veriskill_types::{AnswerOption, LocalizedText, Question};

/// Options generated per question by [`NullQuestionBank::generate`].
pub const GENERATED_OPTIONS: usize = 4;

/// An in-memory question bank for testing.
///
/// Records every request so tests can assert which role the engine asked for.
pub struct NullQuestionBank {
    sets: Mutex<HashMap<(String, u8), Vec<Question>>>,
    requests: Mutex<Vec<(String, u8)>>,
    unavailable: Mutex<bool>,
}

impl NullQuestionBank {
    pub fn new() -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            unavailable: Mutex::new(false),
        }
    }

    /// Install a question set for (role, step).
    pub fn insert(&self, role: &str, step: u8, questions: Vec<Question>) {
        self.sets
            .lock()
            .unwrap()
            .insert((role.to_string(), step), questions);
    }

    /// Install `count` generated questions for (role, step) and return them.
    ///
    /// Question `i` has id `{role}-s{step}-q{i}` and its correct answer at
    /// option index [`correct_index`]`(i)`.
    pub fn generate(&self, role: &str, step: u8, count: usize) -> Vec<Question> {
        let questions: Vec<Question> = (0..count)
            .map(|i| {
                let options = (0..GENERATED_OPTIONS)
                    .map(|o| {
                        AnswerOption::new(
                            LocalizedText::english(format!("option {o}")),
                            o == correct_index(i),
                        )
                    })
                    .collect();
                Question::new(
                    format!("{role}-s{step}-q{i}"),
                    LocalizedText::english(format!("{role} step {step} question {i}"))
                        .with("hi", format!("{role} charan {step} prashn {i}")),
                    options,
                )
            })
            .collect();
        self.insert(role, step, questions.clone());
        questions
    }

    /// Make every subsequent request fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Every (role, step) requested so far, in order.
    pub fn requests(&self) -> Vec<(String, u8)> {
        self.requests.lock().unwrap().clone()
    }
}

/// Index of the correct option for generated question `i`.
pub fn correct_index(i: usize) -> usize {
    i % GENERATED_OPTIONS
}

/// Index of a wrong option for generated question `i`.
pub fn wrong_index(i: usize) -> usize {
    (i + 1) % GENERATED_OPTIONS
}

impl Default for NullQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionProvider for NullQuestionBank {
    fn get_questions(&self, role: &str, step: u8) -> Result<Vec<Question>, StoreError> {
        self.requests
            .lock()
            .unwrap()
            .push((role.to_string(), step));
        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::Unavailable("null question bank offline".into()));
        }
        Ok(self
            .sets
            .lock()
            .unwrap()
            .get(&(role.to_string(), step))
            .cloned()
            .unwrap_or_default())
    }
}
