//! Typed records for the two input tables and their joined view.
//!
//! `CaseRecord` and `VaccinationRecord` are loaded once and held immutable
//! in a [`RecordStore`] for the duration of a query session. `CombinedRecord`
//! only exists as the output of the join; it is recomputed from the store,
//! never persisted.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Daily case/death counts for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: u64,
    pub total_deaths: u64,
}

/// Daily vaccination/population statistics for one country.
///
/// Every field past the key is optional in the source data; absent values
/// stay `None` through all downstream computation, they are never coerced
/// to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub country: String,
    pub date: NaiveDate,
    pub total_vaccinations: Option<u64>,
    pub people_vaccinated: Option<u64>,
    pub people_fully_vaccinated: Option<u64>,
    pub population: Option<u64>,
    pub reproduction_rate: Option<f64>,
}

/// Inner join of the two input tables plus the derived ratio columns.
///
/// `death_percentage` and `full_vaccination_rate` are `None` when their
/// denominator is zero or absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub country: String,
    pub date: NaiveDate,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub death_percentage: Option<f64>,
    pub total_vaccinations: Option<u64>,
    pub people_vaccinated: Option<u64>,
    pub people_fully_vaccinated: Option<u64>,
    pub full_vaccination_rate: Option<f64>,
    pub reproduction_rate: Option<f64>,
}

/// Immutable holder of the two input tables.
///
/// Construction verifies that `(country, date)` identifies at most one
/// record per table; the tables are never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RecordStore {
    cases: Vec<CaseRecord>,
    vaccinations: Vec<VaccinationRecord>,
}

impl RecordStore {
    /// Build a store from pre-parsed records.
    pub fn new(cases: Vec<CaseRecord>, vaccinations: Vec<VaccinationRecord>) -> Result<Self> {
        let mut seen: HashSet<(&str, NaiveDate)> = HashSet::with_capacity(cases.len());
        for rec in &cases {
            if !seen.insert((rec.country.as_str(), rec.date)) {
                return Err(Error::DuplicateKey(format!(
                    "cases ({}, {})",
                    rec.country, rec.date
                )));
            }
        }

        seen.clear();
        for rec in &vaccinations {
            if !seen.insert((rec.country.as_str(), rec.date)) {
                return Err(Error::DuplicateKey(format!(
                    "vaccinations ({}, {})",
                    rec.country, rec.date
                )));
            }
        }

        Ok(RecordStore {
            cases,
            vaccinations,
        })
    }

    /// The case/death table.
    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    /// The vaccination table.
    pub fn vaccinations(&self) -> &[VaccinationRecord] {
        &self.vaccinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_store_accepts_unique_keys() {
        let cases = vec![
            CaseRecord {
                country: "Japan".to_string(),
                date: date("2021-03-01"),
                total_cases: 1000,
                total_deaths: 50,
            },
            CaseRecord {
                country: "Japan".to_string(),
                date: date("2021-03-02"),
                total_cases: 1100,
                total_deaths: 52,
            },
        ];

        let store = RecordStore::new(cases, Vec::new()).unwrap();
        assert_eq!(store.cases().len(), 2);
        assert!(store.vaccinations().is_empty());
    }

    #[test]
    fn test_store_rejects_duplicate_key() {
        let cases = vec![
            CaseRecord {
                country: "Japan".to_string(),
                date: date("2021-03-01"),
                total_cases: 1000,
                total_deaths: 50,
            },
            CaseRecord {
                country: "Japan".to_string(),
                date: date("2021-03-01"),
                total_cases: 1001,
                total_deaths: 50,
            },
        ];

        let result = RecordStore::new(cases, Vec::new());
        assert!(matches!(result, Err(Error::DuplicateKey(_))));
    }

    #[test]
    fn test_same_key_allowed_across_tables() {
        let cases = vec![CaseRecord {
            country: "Japan".to_string(),
            date: date("2021-03-01"),
            total_cases: 1000,
            total_deaths: 50,
        }];
        let vaccinations = vec![VaccinationRecord {
            country: "Japan".to_string(),
            date: date("2021-03-01"),
            total_vaccinations: Some(2000),
            people_vaccinated: Some(800),
            people_fully_vaccinated: Some(500),
            population: Some(1000),
            reproduction_rate: Some(1.1),
        }];

        assert!(RecordStore::new(cases, vaccinations).is_ok());
    }
}
