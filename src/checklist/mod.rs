pub mod summary;
pub mod types;
pub mod validation;

pub use summary::{count_questions, score_class, ChecklistSummary};
pub use types::*;
pub use validation::{validate_checklist, ValidationResult};
