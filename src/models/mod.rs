pub mod anime;
pub mod season;
pub mod validation;

pub use anime::{AnimeRecord, RecordEdit, apply_edits};
pub use season::Season;
pub use validation::{ValidationResult, ValidationSummary};
