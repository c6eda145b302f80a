//! Table-wide production totals.

use crate::models::{ProductionRow, ProductionSummary};

// ---

/// Sum every row. Fields are taken as stored, so a direct `bottles` or
/// `fermentedLiquid` override counts at its overridden value.
pub fn compute_summary(rows: &[ProductionRow]) -> ProductionSummary {
    // ---
    let total = |value: fn(&ProductionRow) -> f64| rows.iter().map(value).sum::<f64>();

    let average_bottle_ratio = if rows.is_empty() {
        0.0
    } else {
        total(|row| row.bottle_ratio) / rows.len() as f64
    };

    ProductionSummary {
        total_agave: total(|row| row.agave),
        total_fermented_liquid: total(|row| row.fermented_liquid),
        total_bottles: total(|row| row.bottles),
        average_bottle_ratio,
        total_kenya_sales: total(|row| row.kenya_sales),
        total_uk_sales: total(ProductionRow::uk_sales),
    }
}
