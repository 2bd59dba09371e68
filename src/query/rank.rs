//! Top-N ranking of per-country death-percentage maxima.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::CombinedRecord;
use crate::stats;

/// One entry of the top-N ranking; at most one per country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub death_percentage: f64,
}

/// For each country, pick the record with the highest death percentage, then
/// return the `limit` highest countries ordered descending.
///
/// Records with `total_cases <= min_cases` or with more recorded deaths than
/// cases are excluded before ranking. The deaths-exceed-cases guard rejects
/// malformed input for this operation only; the same records still appear in
/// trend, aggregate, and correlate output. The percentage is recomputed from
/// the raw counts rather than read off the combined record.
///
/// Ties within a country resolve to the earliest date; equal percentages
/// across countries order ascending by country name. A country with a single
/// qualifying record is its own top-1 representative. Fewer qualifying
/// countries than `limit` returns them all.
pub fn top_death_percentage(
    combined: &[CombinedRecord],
    min_cases: u64,
    limit: usize,
) -> Vec<RankedRow> {
    // Best qualifying record per country
    let mut best: HashMap<&str, RankedRow> = HashMap::new();
    for rec in combined {
        if rec.total_cases <= min_cases || rec.total_deaths > rec.total_cases {
            continue;
        }

        let pct = match stats::percent_of(rec.total_deaths as f64, rec.total_cases as f64) {
            Some(pct) => pct,
            None => continue,
        };

        let candidate = RankedRow {
            country: rec.country.clone(),
            date: rec.date,
            total_cases: rec.total_cases,
            total_deaths: rec.total_deaths,
            death_percentage: pct,
        };

        match best.get_mut(rec.country.as_str()) {
            Some(current) => {
                let better = pct > current.death_percentage
                    || (pct == current.death_percentage && candidate.date < current.date);
                if better {
                    *current = candidate;
                }
            }
            None => {
                best.insert(rec.country.as_str(), candidate);
            }
        }
    }

    let mut ranked: Vec<RankedRow> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.death_percentage
            .partial_cmp(&a.death_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });
    ranked.truncate(limit);
    ranked
}
