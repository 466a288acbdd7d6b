//! Evaluation Report
//!
//! Operator-facing table showing how each cart line was judged.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartSnapshot,
    configuration::Configuration,
    evaluator::{DiscountDecision, evaluate, explain},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the per-line evaluation table followed by a one-line summary.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_report(
    mut out: impl io::Write,
    config: Option<&Configuration>,
    cart: &CartSnapshot,
) -> Result<(), ReportError> {
    let Some(verdicts) = explain(config, cart) else {
        writeln!(out, "No usable volume discount configuration; no discount.")?;

        return Ok(());
    };

    let mut builder = Builder::default();

    builder.push_record(["", "Line", "Product", "Qty", "Outcome"]);

    for (idx, (line, verdict)) in verdicts.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.id().to_string(),
            line.product()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            line.quantity().to_string(),
            verdict.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")?;

    match evaluate(config, cart) {
        DiscountDecision::NoDiscount => writeln!(out, "No qualifying lines; no discount.")?,
        DiscountDecision::Discount(application) => writeln!(
            out,
            "{} ({} of {} lines)",
            application.message(),
            application.targets().len(),
            cart.len()
        )?,
    }

    Ok(())
}
