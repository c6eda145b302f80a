//! Row model and derivation engine.
//!
//! Every function here is pure: it reads the current table and returns a new
//! one, or an [`EditError`] when the edit cannot apply. Only the addressed row
//! changes on a field edit.
//!
//! Derivation rules by edited field:
//! - `agave`: recompute fermented liquid and bottles, keep the row's prior
//!   Kenya proportion.
//! - `bottleRatio`: recompute bottles from the current agave, keep the prior
//!   Kenya proportion. Fermented liquid is untouched.
//! - `kenyaSales`: clamp into `[0, bottles]`.
//! - `batch`, `date`, `fermentedLiquid`, `bottles`: stored as given with no
//!   cascade. Typing `bottles` or `fermentedLiquid` directly overrides the
//!   derived value until the next `agave`/`bottleRatio` edit.

use chrono::{Duration, NaiveDate};

use super::EditError;
use crate::dates::parse_uk_date;
use crate::models::{clamp_kenya_sales, Field, ProductionRow, LIQUID_PER_AGAVE};

// ---

pub const SEED_BATCH: i64 = 20;
pub const SEED_AGAVE: f64 = 65.0;
pub const SEED_AGAVE_STEP: f64 = 5.0;
pub const SEED_AGAVE_CAP: f64 = 100.0;
pub const SEED_CADENCE_WEEKS: i64 = 3;
pub const SEED_ROWS: u32 = 10;
pub const SEED_BOTTLE_RATIO: f64 = 2.0;
pub const SEED_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 3, 7) {
    Some(date) => date,
    None => panic!("invalid seed start date"),
};

/// Parameters for the synthetic starting table.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedParams {
    pub rows: u32,
    pub start_date: NaiveDate,
    pub bottle_ratio: f64,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            rows: SEED_ROWS,
            start_date: SEED_START,
            bottle_ratio: SEED_BOTTLE_RATIO,
        }
    }
}

/// Generate the starting table: one batch every three weeks, batch numbers
/// counting up from 20, agave growing by 5 per batch up to 100.
pub fn seed_rows(params: &SeedParams) -> Vec<ProductionRow> {
    // ---
    let mut rows = Vec::new();
    let mut batch = SEED_BATCH;
    let mut date = params.start_date;
    let mut agave = SEED_AGAVE;

    for id in 0..params.rows {
        rows.push(ProductionRow::new(id, batch, date, agave, params.bottle_ratio));

        batch += 1;
        date = date + Duration::weeks(SEED_CADENCE_WEEKS);
        agave = (agave + SEED_AGAVE_STEP).min(SEED_AGAVE_CAP);
    }

    rows
}

// ---

/// Apply one field edit to the row with `row_id`.
pub fn edit_field(
    rows: &[ProductionRow],
    row_id: u32,
    field: Field,
    raw: &str,
) -> Result<Vec<ProductionRow>, EditError> {
    // ---
    if !rows.iter().any(|row| row.id == row_id) {
        return Err(EditError::UnknownRow(row_id));
    }

    rows.iter()
        .map(|row| {
            if row.id == row_id {
                apply_edit(row, field, raw)
            } else {
                Ok(row.clone())
            }
        })
        .collect()
}

/// Set every row's bottle ratio to `raw`, keeping each row's Kenya proportion.
pub fn set_global_ratio(rows: &[ProductionRow], raw: &str) -> Result<Vec<ProductionRow>, EditError> {
    // ---
    let ratio = parse_number(Field::BottleRatio, raw)?;

    Ok(rows
        .iter()
        .map(|row| {
            let bottles = row.agave * ratio;
            ProductionRow {
                bottle_ratio: ratio,
                bottles,
                kenya_sales: rescale_kenya_sales(row, bottles),
                ..row.clone()
            }
        })
        .collect())
}

/// Kenya allocation for `new_bottles` at `prior`'s Kenya proportion, rounded
/// to whole bottles and clamped into `[0, new_bottles]`.
pub fn rescale_kenya_sales(prior: &ProductionRow, new_bottles: f64) -> f64 {
    // ---
    clamp_kenya_sales((new_bottles * prior.kenya_share()).round(), new_bottles)
}

fn apply_edit(row: &ProductionRow, field: Field, raw: &str) -> Result<ProductionRow, EditError> {
    // ---
    let mut next = row.clone();

    match field {
        Field::Batch => next.batch = parse_integer(raw)?,
        Field::Date => next.date = parse_uk_date(raw)?,
        Field::Agave => {
            let agave = parse_number(field, raw)?;
            next.agave = agave;
            next.fermented_liquid = agave * LIQUID_PER_AGAVE;
            next.bottles = agave * row.bottle_ratio;
            next.kenya_sales = rescale_kenya_sales(row, next.bottles);
        }
        Field::BottleRatio => {
            let ratio = parse_number(field, raw)?;
            next.bottle_ratio = ratio;
            next.bottles = row.agave * ratio;
            next.kenya_sales = rescale_kenya_sales(row, next.bottles);
        }
        Field::KenyaSales => {
            next.kenya_sales = clamp_kenya_sales(parse_number(field, raw)?, row.bottles);
        }
        Field::FermentedLiquid => next.fermented_liquid = parse_number(field, raw)?,
        Field::Bottles => next.bottles = parse_number(field, raw)?,
    }

    Ok(next)
}

fn parse_number(field: Field, raw: &str) -> Result<f64, EditError> {
    // ---
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EditError::NotANumber {
            field: field.as_str(),
            raw: raw.to_string(),
        })
}

// Whole numbers only: "21.5" is rejected rather than truncated to 21.
fn parse_integer(raw: &str) -> Result<i64, EditError> {
    raw.trim()
        .parse()
        .map_err(|_| EditError::NotAnInteger(raw.to_string()))
}
