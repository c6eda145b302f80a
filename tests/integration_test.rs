use agave_estimator::{
    commands::{dispatch, Reply},
    dates::{format_uk_date, parse_uk_date},
    Estimator, Field, SeedParams,
};
use anyhow::{anyhow, Result};
use serde_json::Value;

fn reply(estimator: &mut Estimator, line: &str) -> Result<Value> {
    // ---
    match dispatch(estimator, line) {
        Reply::Json(value) => Ok(value),
        other => Err(anyhow!("expected a JSON reply to {:?}, got {:?}", line, other)),
    }
}

/// Derived fields hold for every row not touched by a direct override.
fn assert_table_consistent(estimator: &Estimator) {
    // ---
    for row in estimator.rows() {
        assert_eq!(row.fermented_liquid, row.agave * 35.0, "row {}", row.id);
        assert_eq!(row.bottles, row.agave * row.bottle_ratio, "row {}", row.id);
        assert!(
            row.kenya_sales >= 0.0 && row.kenya_sales <= row.bottles,
            "row {}: kenya {} outside [0, {}]",
            row.id,
            row.kenya_sales,
            row.bottles
        );
    }
}

#[test]
fn session_keeps_derived_fields_consistent() -> Result<()> {
    // ---
    let mut estimator = Estimator::seeded(&SeedParams::default());

    let edits = [
        (0, Field::Agave, "70"),
        (1, Field::BottleRatio, "2.5"),
        (2, Field::KenyaSales, "9999"),
        (3, Field::Agave, "0"),
        (3, Field::Agave, "40"),
        (4, Field::KenyaSales, "-12"),
        (5, Field::Date, "14/2/2026"),
        (6, Field::Batch, "101"),
        (7, Field::Agave, "not a number"),
    ];
    for (row_id, field, raw) in edits {
        estimator.edit_field(row_id, field, raw);
        assert_table_consistent(&estimator);
    }

    assert!(estimator.set_global_ratio("3").is_applied());
    assert_table_consistent(&estimator);

    assert!(estimator.set_monthly_kenya_sales("Mar 2025", 100.0).is_applied());
    assert_table_consistent(&estimator);

    assert_eq!(estimator.row(0).unwrap().bottles, 210.0);
    assert_eq!(estimator.row(5).unwrap().batch, 25);
    assert_eq!(estimator.row(6).unwrap().batch, 101);
    Ok(())
}

#[test]
fn monthly_view_tracks_edits() -> Result<()> {
    // ---
    let mut estimator = Estimator::default();

    // Bring March 2025 down to 200 bottles.
    estimator.edit_field(0, Field::Agave, "50");
    estimator.edit_field(1, Field::Agave, "50");
    assert_eq!(estimator.max_kenya_sales("Mar 2025"), 200.0);

    assert!(estimator.set_monthly_kenya_sales("Mar 2025", 50.0).is_applied());
    for row in estimator.rows().iter().filter(|r| r.id < 2) {
        assert_eq!(row.kenya_sales, (row.bottles * 0.25).round());
    }

    let aggregates = estimator.monthly_aggregates();
    let march = aggregates
        .iter()
        .find(|a| a.month.to_string() == "Mar 2025")
        .ok_or_else(|| anyhow!("March 2025 missing"))?;
    assert_eq!(march.kenya, 50.0);
    assert_eq!(march.uk, 150.0);
    assert_eq!(march.kenya_percentage, 25.0);

    for aggregate in &aggregates {
        let label = aggregate.month.to_string();
        assert_eq!(
            estimator.max_kenya_sales(&label),
            estimator.current_kenya_sales(&label) + estimator.uk_sales(&label)
        );
    }
    Ok(())
}

#[test]
fn seed_dates_round_trip_through_text() -> Result<()> {
    // ---
    let estimator = Estimator::default();
    for row in estimator.rows() {
        assert_eq!(parse_uk_date(&format_uk_date(row.date))?, row.date);
    }
    Ok(())
}

#[test]
fn shell_session_end_to_end() -> Result<()> {
    // ---
    let mut estimator = Estimator::default();

    let edited = reply(&mut estimator, "edit 0 agave 70")?;
    assert_eq!(edited["row"]["bottles"], 140.0);
    assert_eq!(edited["row"]["kenyaSales"], 28.0);

    let ratio = reply(&mut estimator, "ratio 3")?;
    assert_eq!(ratio["outcome"]["applied"], true);

    let months = reply(&mut estimator, "months")?;
    let months = months
        .as_array()
        .ok_or_else(|| anyhow!("months reply is not an array"))?;
    assert_eq!(months.len(), 7);
    assert_eq!(months[0]["month"], "Mar 2025");
    // (70 + 70) * 3 bottles in March after the edits above.
    assert_eq!(months[0]["bottles"], 420.0);

    let summary = reply(&mut estimator, "summary")?;
    assert_eq!(summary["totalAgave"], 865.0);
    assert_eq!(summary["totalBottles"], 2595.0);
    assert_eq!(summary["averageBottleRatio"], 3.0);

    let ignored = reply(&mut estimator, "kenya Xyz 2025 50")?;
    assert_eq!(ignored["outcome"]["applied"], false);
    assert_eq!(ignored["month"]["max"], 0.0);
    assert_eq!(ignored["month"]["current"], 0.0);

    assert_eq!(dispatch(&mut estimator, "quit"), Reply::Quit);
    Ok(())
}
