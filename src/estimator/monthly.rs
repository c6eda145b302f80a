//! Monthly aggregation and redistribution.
//!
//! Aggregates are never stored; they are rebuilt from the rows on every call.
//! Redistribution here differs from the per-row rule in
//! [`super::rows`]: one month-wide ratio overwrites every row's Kenya
//! allocation in that month.

use std::collections::BTreeMap;

use tracing::warn;

use super::EditError;
use crate::models::{MonthKey, MonthlyAggregate, ProductionRow};

// ---

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    bottles: f64,
    kenya: f64,
    uk: f64,
}

/// Group rows by calendar month, in chronological order, with running totals.
pub fn compute_monthly_aggregates(rows: &[ProductionRow]) -> Vec<MonthlyAggregate> {
    // ---
    let mut months: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    for row in rows {
        let totals = months.entry(row.month_key()).or_default();
        totals.bottles += row.bottles;
        totals.kenya += row.kenya_sales;
        totals.uk += row.uk_sales();
    }

    // BTreeMap iterates in MonthKey order, i.e. (year, month) ascending.
    let mut cumulative_kenya = 0.0;
    let mut cumulative_uk = 0.0;
    months
        .into_iter()
        .map(|(month, totals)| {
            cumulative_kenya += totals.kenya;
            cumulative_uk += totals.uk;
            MonthlyAggregate {
                month,
                bottles: totals.bottles,
                kenya: totals.kenya,
                uk: totals.uk,
                cumulative_kenya,
                cumulative_uk,
                cumulative_total: cumulative_kenya + cumulative_uk,
                kenya_percentage: kenya_percentage(totals.kenya, totals.bottles),
            }
        })
        .collect()
}

/// Whole-number percentage of `bottles` going to Kenya, 0 for an empty month.
pub fn kenya_percentage(kenya: f64, bottles: f64) -> f64 {
    // ---
    if bottles > 0.0 {
        (kenya / bottles * 100.0).round()
    } else {
        0.0
    }
}

pub fn month_total_bottles(rows: &[ProductionRow], month: MonthKey) -> f64 {
    sum_month(rows, month, |row| row.bottles)
}

pub fn month_kenya_sales(rows: &[ProductionRow], month: MonthKey) -> f64 {
    sum_month(rows, month, |row| row.kenya_sales)
}

pub fn month_uk_sales(rows: &[ProductionRow], month: MonthKey) -> f64 {
    sum_month(rows, month, ProductionRow::uk_sales)
}

fn sum_month(rows: &[ProductionRow], month: MonthKey, value: impl Fn(&ProductionRow) -> f64) -> f64 {
    // ---
    rows.iter()
        .filter(|row| month.contains(row.date))
        .map(value)
        .sum()
}

// ---

/// Set the Kenya allocation of a whole month to `target_kenya_bottles` by
/// applying one uniform ratio to every row in it.
///
/// The ratio is `target / month bottles`, capped at 1 and floored at 0. Each
/// row gets `round(bottles * ratio)`; rows in other months are untouched.
/// Individual row proportions inside the month are not preserved.
pub fn set_monthly_kenya_sales(
    rows: &[ProductionRow],
    month: MonthKey,
    target_kenya_bottles: f64,
) -> Result<Vec<ProductionRow>, EditError> {
    // ---
    let total = month_total_bottles(rows, month);
    if total == 0.0 {
        return Err(EditError::EmptyMonth(month));
    }

    let ratio = target_kenya_bottles / total;
    if !ratio.is_finite() {
        return Err(EditError::NonFiniteRatio {
            target: target_kenya_bottles,
            total,
        });
    }
    let ratio = ratio.clamp(0.0, 1.0);

    Ok(rows
        .iter()
        .map(|row| {
            if month.contains(row.date) {
                ProductionRow {
                    kenya_sales: (row.bottles * ratio).round(),
                    ..row.clone()
                }
            } else {
                row.clone()
            }
        })
        .collect())
}

// ---

/// Ceiling for a month's Kenya allocation: all of its bottles.
/// Returns 0 when `label` does not name a month.
pub fn max_kenya_sales(rows: &[ProductionRow], label: &str) -> f64 {
    resolve_or_zero(label, |month| month_total_bottles(rows, month))
}

/// Kenya bottles currently allocated in the month named by `label`, or 0.
pub fn current_kenya_sales(rows: &[ProductionRow], label: &str) -> f64 {
    resolve_or_zero(label, |month| month_kenya_sales(rows, month))
}

/// UK bottles in the month named by `label`, or 0.
pub fn uk_sales(rows: &[ProductionRow], label: &str) -> f64 {
    resolve_or_zero(label, |month| month_uk_sales(rows, month))
}

fn resolve_or_zero(label: &str, query: impl FnOnce(MonthKey) -> f64) -> f64 {
    // ---
    match label.parse::<MonthKey>() {
        Ok(month) => query(month),
        Err(e) => {
            warn!("Cannot resolve month label {:?}: {}", label, e);
            0.0
        }
    }
}
