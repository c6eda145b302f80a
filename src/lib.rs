//! Production estimator for a small batch-production business.
//!
//! Tracks a fixed table of production batches (agave input, fermented
//! liquid, bottle yield) and the split of each batch's bottles between the
//! Kenya and UK markets, with a month-level view for charting.
//!
//! Module boundaries follow the Explicit Module Boundary Pattern (EMBP):
//! - `models`: row, field and month types plus row-level derivation helpers
//! - `dates`: the `day/month/year` text boundary and month abbreviations
//! - `estimator`: derivation engine, monthly aggregation, and the owned
//!   [`Estimator`] table
//! - `commands`: the line-oriented shell the binary drives
//! - `config`: runtime configuration from the environment
//!
//! Callers outside a module only use what its gateway re-exports here.

pub mod commands;
pub mod config;
pub mod dates;
pub mod estimator;
pub mod models;

pub use config::Config;
pub use estimator::{EditError, EditOutcome, Estimator, SeedParams};
pub use models::{Field, MonthKey, MonthlyAggregate, ProductionRow, ProductionSummary};
