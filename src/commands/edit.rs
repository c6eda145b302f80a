// src/commands/edit.rs
//! Mutating shell commands.
//!
//! Arguments arrive already parsed by the gateway. Field values are passed
//! through raw: whether a value parses is the engine's call, and an
//! unparseable one comes back as an ignored outcome.

use serde_json::{json, Value};

use super::show;
use crate::{EditOutcome, Estimator, Field};

/// `edit <id> <field> <value>`
pub(super) fn edit(estimator: &mut Estimator, row_id: u32, field: Field, raw: &str) -> Value {
    // ---
    let outcome = estimator.edit_field(row_id, field, raw);
    json!({
        "outcome": outcome_json(&outcome),
        "row": estimator.row(row_id),
    })
}

/// `ratio <value>`
pub(super) fn ratio(estimator: &mut Estimator, raw: &str) -> Value {
    // ---
    let outcome = estimator.set_global_ratio(raw);
    json!({ "outcome": outcome_json(&outcome) })
}

/// `kenya <Mon> <YYYY> <bottles>`
pub(super) fn kenya(estimator: &mut Estimator, label: &str, target: f64) -> Value {
    // ---
    let outcome = estimator.set_monthly_kenya_sales(label, target);
    json!({
        "outcome": outcome_json(&outcome),
        "month": show::month(estimator, label),
    })
}

fn outcome_json(outcome: &EditOutcome) -> Value {
    // ---
    match outcome {
        EditOutcome::Applied => json!({ "applied": true }),
        EditOutcome::Ignored(reason) => json!({
            "applied": false,
            "reason": reason.to_string(),
        }),
    }
}
