//! Inner join of the case and vaccination tables.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::record::{CaseRecord, CombinedRecord, VaccinationRecord};
use crate::stats;

/// Inner-join the two tables on `(country, date)` and compute the derived
/// ratio columns.
///
/// Only keys present in both inputs produce a record, so the output size is
/// bounded by the smaller table. Division by a zero or absent denominator
/// yields an absent column value, never an error. Output order follows the
/// `cases` input restricted to matched keys, so repeated runs over the same
/// input produce identical output.
///
/// Pure function of its inputs; neither table is modified.
pub fn combine(cases: &[CaseRecord], vaccinations: &[VaccinationRecord]) -> Vec<CombinedRecord> {
    // Index the vaccination side by join key
    let mut vax_index: HashMap<(&str, NaiveDate), &VaccinationRecord> =
        HashMap::with_capacity(vaccinations.len());
    for rec in vaccinations {
        vax_index.entry((rec.country.as_str(), rec.date)).or_insert(rec);
    }

    let mut combined = Vec::new();
    for case in cases {
        if let Some(vax) = vax_index.get(&(case.country.as_str(), case.date)) {
            combined.push(CombinedRecord {
                country: case.country.clone(),
                date: case.date,
                total_cases: case.total_cases,
                total_deaths: case.total_deaths,
                death_percentage: stats::percent_of(
                    case.total_deaths as f64,
                    case.total_cases as f64,
                ),
                total_vaccinations: vax.total_vaccinations,
                people_vaccinated: vax.people_vaccinated,
                people_fully_vaccinated: vax.people_fully_vaccinated,
                full_vaccination_rate: full_vaccination_rate(vax),
                reproduction_rate: vax.reproduction_rate,
            });
        }
    }

    log::debug!(
        "combine: {} of {} case rows matched {} vaccination rows",
        combined.len(),
        cases.len(),
        vaccinations.len()
    );

    combined
}

fn full_vaccination_rate(vax: &VaccinationRecord) -> Option<f64> {
    let fully = vax.people_fully_vaccinated?;
    let population = vax.population?;
    stats::percent_of(fully as f64, population as f64)
}
