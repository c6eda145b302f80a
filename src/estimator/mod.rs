mod error;
mod table;

pub mod monthly;
pub mod rows;
pub mod summary;

// ---

pub use error::{EditError, EditOutcome};
pub use monthly::compute_monthly_aggregates;
pub use rows::SeedParams;
pub use summary::compute_summary;
pub use table::Estimator;
