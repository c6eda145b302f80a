//! Data models for the production estimator.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::dates::{format_uk_date, month_abbreviation, month_number};

// ---

/// Litres of fermented liquid per agave piece.
pub const LIQUID_PER_AGAVE: f64 = 35.0;

/// Kenya share applied when a row has no prior bottles to take a proportion from.
pub const DEFAULT_KENYA_SHARE: f64 = 0.2;

/// One production batch.
///
/// `fermented_liquid` and `bottles` are derived from `agave` and
/// `bottle_ratio` by the derivation engine, but are plain fields: a direct
/// edit to either is stored as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRow {
    // ---
    pub id: u32,
    pub batch: i64,
    #[serde(serialize_with = "serialize_uk_date")]
    pub date: NaiveDate,
    pub agave: f64,
    pub fermented_liquid: f64,
    pub bottle_ratio: f64,
    pub bottles: f64,
    pub kenya_sales: f64,
}

/// Simple derivation helpers
impl ProductionRow {
    // ---
    /// Build a row with every derived field computed and the default Kenya share.
    pub fn new(id: u32, batch: i64, date: NaiveDate, agave: f64, bottle_ratio: f64) -> Self {
        // ---
        let bottles = agave * bottle_ratio;
        Self {
            id,
            batch,
            date,
            agave,
            fermented_liquid: agave * LIQUID_PER_AGAVE,
            bottle_ratio,
            bottles,
            kenya_sales: (bottles * DEFAULT_KENYA_SHARE).round(),
        }
    }

    /// Fraction of this row's bottles allocated to Kenya, falling back to
    /// [`DEFAULT_KENYA_SHARE`] when there are no bottles.
    pub fn kenya_share(&self) -> f64 {
        // ---
        if self.bottles > 0.0 {
            self.kenya_sales / self.bottles
        } else {
            DEFAULT_KENYA_SHARE
        }
    }

    /// Bottles left for the UK market.
    pub fn uk_sales(&self) -> f64 {
        self.bottles - self.kenya_sales
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

/// Clamp a Kenya allocation into `[0, bottles]`.
///
/// When `bottles` is itself negative (only reachable through a direct
/// override) the result is 0.
pub fn clamp_kenya_sales(kenya_sales: f64, bottles: f64) -> f64 {
    // ---
    kenya_sales.min(bottles).max(0.0)
}

fn serialize_uk_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_uk_date(*date))
}

// ---

/// Editable columns of a [`ProductionRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Batch,
    Date,
    Agave,
    FermentedLiquid,
    BottleRatio,
    Bottles,
    KenyaSales,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field {0:?}")]
pub struct FieldParseError(pub String);

impl Field {
    /// Column name as the presentation layer spells it.
    pub fn as_str(self) -> &'static str {
        // ---
        match self {
            Field::Batch => "batch",
            Field::Date => "date",
            Field::Agave => "agave",
            Field::FermentedLiquid => "fermentedLiquid",
            Field::BottleRatio => "bottleRatio",
            Field::Bottles => "bottles",
            Field::KenyaSales => "kenyaSales",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    /// Accepts camelCase column names and their snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s.trim() {
            "batch" => Ok(Field::Batch),
            "date" => Ok(Field::Date),
            "agave" => Ok(Field::Agave),
            "fermentedLiquid" | "fermented_liquid" => Ok(Field::FermentedLiquid),
            "bottleRatio" | "bottle_ratio" => Ok(Field::BottleRatio),
            "bottles" => Ok(Field::Bottles),
            "kenyaSales" | "kenya_sales" => Ok(Field::KenyaSales),
            other => Err(FieldParseError(other.to_string())),
        }
    }
}

// ---

/// Calendar month identity used to group rows. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    // Field order drives the derived Ord: year first, then month.
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthKeyError {
    #[error("expected \"Mon YYYY\", got {0:?}")]
    Shape(String),

    #[error("unrecognized month abbreviation {0:?}")]
    Month(String),

    #[error("invalid year {0:?}")]
    Year(String),
}

impl MonthKey {
    // ---
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    /// `"Mar 2025"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        let abbreviation = month_abbreviation(self.month).unwrap_or("???");
        write!(f, "{} {}", abbreviation, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        let mut parts = s.split_whitespace();
        let (Some(abbreviation), Some(year), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(MonthKeyError::Shape(s.to_string()));
        };

        let month =
            month_number(abbreviation).ok_or_else(|| MonthKeyError::Month(abbreviation.into()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthKeyError::Year(year.to_string()))?;

        Ok(Self { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-month totals plus running totals carried forward from earlier months.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    // ---
    pub month: MonthKey,
    pub bottles: f64,
    pub kenya: f64,
    pub uk: f64,
    pub cumulative_kenya: f64,
    pub cumulative_uk: f64,
    pub cumulative_total: f64,
    /// Whole-number share of this month's bottles going to Kenya.
    pub kenya_percentage: f64,
}

/// Totals across the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSummary {
    // ---
    pub total_agave: f64,
    pub total_fermented_liquid: f64,
    pub total_bottles: f64,
    /// Unweighted mean of the rows' bottle ratios, 0 for an empty table.
    pub average_bottle_ratio: f64,
    pub total_kenya_sales: f64,
    pub total_uk_sales: f64,
}
