pub mod filter;
pub mod storage;
pub mod types;

pub use filter::{average_completion, group_results, ChecklistFilter, ResultsGrouping};
pub use storage::{get_store_path, load_store, read_checklist, read_responses, save_store};
pub use types::ChecklistStore;
