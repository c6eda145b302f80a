// src/commands/show.rs
//! Read-only shell commands.
//!
//! Sibling of `edit` under the `commands` gateway (EMBP). Nothing here takes
//! `&mut`; these replies are what the presentation layer renders.

use anyhow::Result;
use serde_json::{json, Value};

use crate::estimator::monthly::kenya_percentage;
use crate::Estimator;

/// `rows`: the current table.
pub(super) fn rows(estimator: &Estimator) -> Result<Value> {
    Ok(serde_json::to_value(estimator.rows())?)
}

/// `months`: the monthly aggregate sequence, chronological.
pub(super) fn months(estimator: &Estimator) -> Result<Value> {
    Ok(serde_json::to_value(estimator.monthly_aggregates())?)
}

/// `summary`: table-wide totals.
pub(super) fn summary(estimator: &Estimator) -> Result<Value> {
    Ok(serde_json::to_value(estimator.summary())?)
}

/// `month <Mon> <YYYY>`: slider bounds and current split for one month.
///
/// An unrecognized label is not an error here: every figure is 0.
pub(super) fn month(estimator: &Estimator, label: &str) -> Value {
    // ---
    let max = estimator.max_kenya_sales(label);
    let current = estimator.current_kenya_sales(label);

    json!({
        "month": label,
        "max": max,
        "current": current,
        "uk": estimator.uk_sales(label),
        "kenyaPercentage": kenya_percentage(current, max),
    })
}
