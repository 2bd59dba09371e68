//! Per-country aggregates over the combined table.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::record::CombinedRecord;
use crate::stats;

/// Per-country averages of the two derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAggregate {
    pub country: String,
    pub avg_death_percentage: Option<f64>,
    pub avg_full_vaccination_rate: f64,
}

/// Group the combined table by country, average the derived metrics, and
/// keep countries whose average full-vaccination rate exceeds
/// `min_avg_vaccination_rate`.
///
/// Absent metric values are excluded from both the sum and the count, never
/// treated as zero. A country with no present `full_vaccination_rate` value
/// has a null average and is dropped by the filter; a null average death
/// percentage passes through as `None`. Output is ordered descending by
/// average death percentage (null averages last), ties ascending by country
/// name. Both averages are rounded to two decimals.
pub fn aggregate(
    combined: &[CombinedRecord],
    min_avg_vaccination_rate: f64,
) -> Vec<CountryAggregate> {
    // Present metric values per country
    let mut groups: HashMap<&str, (Vec<f64>, Vec<f64>)> = HashMap::new();
    for rec in combined {
        let (death_pcts, vax_rates) = groups.entry(rec.country.as_str()).or_default();
        if let Some(pct) = rec.death_percentage {
            death_pcts.push(pct);
        }
        if let Some(rate) = rec.full_vaccination_rate {
            vax_rates.push(rate);
        }
    }

    let mut rows: Vec<CountryAggregate> = Vec::new();
    for (country, (death_pcts, vax_rates)) in &groups {
        // A null average never passes the filter
        let avg_rate = match stats::mean(vax_rates) {
            Ok(avg) => stats::round2(avg),
            Err(_) => continue,
        };
        if avg_rate <= min_avg_vaccination_rate {
            continue;
        }

        rows.push(CountryAggregate {
            country: (*country).to_string(),
            avg_death_percentage: stats::mean(death_pcts).ok().map(stats::round2),
            avg_full_vaccination_rate: avg_rate,
        });
    }

    rows.sort_by(|a, b| {
        let by_death = match (a.avg_death_percentage, b.avg_death_percentage) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_death.then_with(|| a.country.cmp(&b.country))
    });
    rows
}
