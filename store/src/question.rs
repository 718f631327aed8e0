//! Question bank trait.

use crate::StoreError;
use veriskill_types::Question;

/// Supplies the question set for a role and step.
///
/// `role` is the lower-case role name used by the bank (`"technician"`,
/// `"sales"`, ...). Implementations return questions in a stable order; an
/// empty list means the bank has nothing for that pair.
pub trait QuestionProvider: Send + Sync {
    fn get_questions(&self, role: &str, step: u8) -> Result<Vec<Question>, StoreError>;
}
