//! The session's single owned production table.

use tracing::{debug, warn};

use super::{monthly, rows, summary, EditError, EditOutcome, SeedParams};
use crate::models::{Field, MonthKey, MonthlyAggregate, ProductionRow, ProductionSummary};

// ---

/// Owns the production rows for one session and applies edits to them.
///
/// Every mutation runs a pure engine function and swaps in the returned table
/// on success. A rejected edit is logged and reported as
/// [`EditOutcome::Ignored`]; the table stays exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimator {
    rows: Vec<ProductionRow>,
}

impl Estimator {
    // ---
    pub fn seeded(params: &SeedParams) -> Self {
        Self::from_rows(rows::seed_rows(params))
    }

    pub fn from_rows(rows: Vec<ProductionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ProductionRow] {
        &self.rows
    }

    pub fn row(&self, row_id: u32) -> Option<&ProductionRow> {
        self.rows.iter().find(|row| row.id == row_id)
    }

    /// Monthly totals, rebuilt from the current rows on every call.
    pub fn monthly_aggregates(&self) -> Vec<MonthlyAggregate> {
        monthly::compute_monthly_aggregates(&self.rows)
    }

    /// Table-wide totals, rebuilt from the current rows on every call.
    pub fn summary(&self) -> ProductionSummary {
        summary::compute_summary(&self.rows)
    }

    pub fn edit_field(&mut self, row_id: u32, field: Field, raw: &str) -> EditOutcome {
        // ---
        let result = rows::edit_field(&self.rows, row_id, field, raw);
        self.commit(result, &format!("edit row {row_id} {field}={raw:?}"))
    }

    pub fn set_global_ratio(&mut self, raw: &str) -> EditOutcome {
        // ---
        let result = rows::set_global_ratio(&self.rows, raw);
        self.commit(result, &format!("global bottle ratio {raw:?}"))
    }

    /// Redistribute Kenya sales across the month named by `label`
    /// (e.g. `"Mar 2025"`).
    pub fn set_monthly_kenya_sales(&mut self, label: &str, target_kenya_bottles: f64) -> EditOutcome {
        // ---
        let result = label
            .parse::<MonthKey>()
            .map_err(EditError::from)
            .and_then(|month| {
                monthly::set_monthly_kenya_sales(&self.rows, month, target_kenya_bottles)
            });
        self.commit(
            result,
            &format!("Kenya sales for {label:?} = {target_kenya_bottles}"),
        )
    }

    pub fn max_kenya_sales(&self, label: &str) -> f64 {
        monthly::max_kenya_sales(&self.rows, label)
    }

    pub fn current_kenya_sales(&self, label: &str) -> f64 {
        monthly::current_kenya_sales(&self.rows, label)
    }

    pub fn uk_sales(&self, label: &str) -> f64 {
        monthly::uk_sales(&self.rows, label)
    }

    fn commit(&mut self, result: Result<Vec<ProductionRow>, EditError>, what: &str) -> EditOutcome {
        // ---
        match result {
            Ok(rows) => {
                debug!("Applied {}", what);
                self.rows = rows;
                EditOutcome::Applied
            }
            Err(e) => {
                warn!("Ignoring {}: {}", what, e);
                EditOutcome::Ignored(e)
            }
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::seeded(&SeedParams::default())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::MonthKeyError;

    #[test]
    fn test_default_is_reference_seed() {
        // ---
        let estimator = Estimator::default();
        assert_eq!(estimator.rows().len(), 10);
        assert_eq!(estimator.row(0).unwrap().bottles, 130.0);
        assert!(estimator.row(10).is_none());
    }

    #[test]
    fn test_summary_follows_edits() {
        // ---
        let mut estimator = Estimator::default();
        assert_eq!(estimator.summary().total_bottles, 1720.0);

        assert!(estimator.edit_field(0, Field::Agave, "70").is_applied());
        assert_eq!(estimator.summary().total_bottles, 1730.0);
        assert_eq!(estimator.summary().total_kenya_sales, 346.0);
    }

    #[test]
    fn test_applied_edit_replaces_table() {
        // ---
        let mut estimator = Estimator::default();

        let outcome = estimator.edit_field(0, Field::Agave, "70");

        assert!(outcome.is_applied());
        assert_eq!(estimator.row(0).unwrap().bottles, 140.0);
        assert_eq!(estimator.row(0).unwrap().kenya_sales, 28.0);
    }

    #[test]
    fn test_ignored_edits_leave_table_untouched() {
        // ---
        let mut estimator = Estimator::default();
        let before = estimator.clone();

        assert!(!estimator.edit_field(0, Field::Agave, "seventy").is_applied());
        assert!(!estimator.edit_field(0, Field::Date, "32/1/2025").is_applied());
        assert!(!estimator.edit_field(99, Field::Agave, "70").is_applied());
        assert!(!estimator.set_global_ratio("").is_applied());
        assert!(!estimator.set_monthly_kenya_sales("Jan 2025", 10.0).is_applied());

        assert_eq!(estimator, before);
    }

    #[test]
    fn test_unresolvable_month_is_ignored() {
        // ---
        let mut estimator = Estimator::default();
        let before = estimator.clone();

        let outcome = estimator.set_monthly_kenya_sales("Xyz 2025", 50.0);

        assert_eq!(
            outcome,
            EditOutcome::Ignored(EditError::Month(MonthKeyError::Month("Xyz".to_string())))
        );
        assert_eq!(estimator.max_kenya_sales("Xyz 2025"), 0.0);
        assert_eq!(estimator.current_kenya_sales("Xyz 2025"), 0.0);
        assert_eq!(estimator, before);
    }

    #[test]
    fn test_monthly_then_row_policies_stay_distinct() {
        // ---
        let mut estimator = Estimator::default();

        // Month-wide ratio: both March rows get the same 50% share.
        assert!(estimator.set_monthly_kenya_sales("Mar 2025", 135.0).is_applied());
        assert_eq!(estimator.row(0).unwrap().kenya_sales, 65.0);
        assert_eq!(estimator.row(1).unwrap().kenya_sales, 70.0);

        // Per-row rule: an agave edit keeps that row's own 50% share.
        assert!(estimator.edit_field(0, Field::Agave, "80").is_applied());
        assert_eq!(estimator.row(0).unwrap().kenya_sales, 80.0);
        assert_eq!(estimator.row(1).unwrap().kenya_sales, 70.0);
    }
}
