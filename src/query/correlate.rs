//! Pearson correlation between the two derived metrics.

use crate::error::Result;
use crate::record::CombinedRecord;
use crate::stats;

/// Correlate death percentage with full-vaccination rate over records with
/// `total_cases > min_cases`.
///
/// Only records where both metrics are present contribute a pair. Fewer than
/// two such pairs, or zero variance in either column, returns
/// `Error::InsufficientData`, which callers can tell apart from a valid
/// coefficient of zero (`Ok(0.0)`).
pub fn correlate(combined: &[CombinedRecord], min_cases: u64) -> Result<f64> {
    let mut death_pcts = Vec::new();
    let mut vax_rates = Vec::new();
    for rec in combined {
        if rec.total_cases <= min_cases {
            continue;
        }
        if let (Some(pct), Some(rate)) = (rec.death_percentage, rec.full_vaccination_rate) {
            death_pcts.push(pct);
            vax_rates.push(rate);
        }
    }

    stats::correlation(&death_pcts, &vax_rates)
}
