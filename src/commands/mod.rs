//! Text command shell over an [`Estimator`].
//!
//! One command per line, one JSON reply per command. Each line is parsed with
//! `clap` into a [`Command`] and handed off to the sibling modules:
//! - `show`: read-only commands (`rows`, `months`, `month`, `summary`)
//! - `edit`: mutations (`edit`, `ratio`, `kenya`)
//!
//! A line clap rejects produces an `{"error": ...}` reply carrying clap's
//! usage text and leaves the table alone. `help` replies with `{"help": ...}`.

use clap::{error::ErrorKind, Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;

use crate::{Estimator, Field};

mod edit;
mod show;

// ---

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Quit,
    Nothing,
}

#[derive(Debug, Parser)]
#[command(name = "estimator", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the production table
    Rows,
    /// Show monthly totals with running totals, oldest month first
    Months,
    /// Show totals across the whole table
    Summary,
    /// Show the Kenya/UK split for one month, e.g. `month Mar 2025`
    Month {
        /// Month abbreviation (`Jan` .. `Dec`)
        month: String,
        year: i32,
    },
    /// Edit one field of one row, e.g. `edit 0 agave 70`
    Edit {
        /// Row id
        id: u32,
        /// Column name (`batch`, `date`, `agave`, `fermentedLiquid`,
        /// `bottleRatio`, `bottles`, `kenyaSales`)
        field: Field,
        /// Raw value; an unparseable value leaves the row unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Set the bottle ratio of every row
    Ratio {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Spread a Kenya bottle target over one month, e.g. `kenya Mar 2025 50`
    Kenya {
        /// Month abbreviation (`Jan` .. `Dec`)
        month: String,
        year: i32,
        /// Kenya bottles for the whole month
        // Kept as a float: fractional targets are not truncated to whole bottles.
        #[arg(allow_negative_numbers = true)]
        target: f64,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[tracing::instrument(skip(estimator))]
pub fn dispatch(estimator: &mut Estimator, line: &str) -> Reply {
    // ---
    if line.trim().is_empty() {
        return Reply::Nothing;
    }

    let command = match Line::try_parse_from(line.split_whitespace()) {
        Ok(parsed) => parsed.command,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            return Reply::Json(json!({ "help": e.render().to_string() }));
        }
        Err(e) => {
            debug!("Rejected command line: {}", e.kind());
            return Reply::Json(json!({ "error": e.render().to_string() }));
        }
    };

    let result = match command {
        Command::Quit => return Reply::Quit,
        Command::Rows => show::rows(estimator),
        Command::Months => show::months(estimator),
        Command::Summary => show::summary(estimator),
        Command::Month { month, year } => Ok(show::month(estimator, &month_label(&month, year))),
        Command::Edit { id, field, value } => Ok(edit::edit(estimator, id, field, &value.join(" "))),
        Command::Ratio { value } => Ok(edit::ratio(estimator, &value)),
        Command::Kenya {
            month,
            year,
            target,
        } => Ok(edit::kenya(estimator, &month_label(&month, year), target)),
    };

    match result {
        Ok(value) => Reply::Json(value),
        Err(e) => {
            debug!("Command failed: {}", e);
            Reply::Json(json!({ "error": e.to_string() }))
        }
    }
}

fn month_label(month: &str, year: i32) -> String {
    format!("{month} {year}")
}
