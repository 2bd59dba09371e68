//! Time-ordered case trend listing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::CombinedRecord;

/// One row of the trend listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub death_percentage: Option<f64>,
}

/// Project the combined table to the case columns, sorted ascending by
/// country, then date. No filtering is applied.
pub fn trend(combined: &[CombinedRecord]) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = combined
        .iter()
        .map(|rec| TrendRow {
            country: rec.country.clone(),
            date: rec.date,
            total_cases: rec.total_cases,
            total_deaths: rec.total_deaths,
            death_percentage: rec.death_percentage,
        })
        .collect();

    rows.sort_by(|a, b| a.country.cmp(&b.country).then_with(|| a.date.cmp(&b.date)));
    rows
}
