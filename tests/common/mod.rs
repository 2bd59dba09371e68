#![allow(dead_code)]

use chrono::NaiveDate;
use covidrs::record::{CaseRecord, VaccinationRecord};

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn case(country: &str, d: &str, total_cases: u64, total_deaths: u64) -> CaseRecord {
    CaseRecord {
        country: country.to_string(),
        date: date(d),
        total_cases,
        total_deaths,
    }
}

pub fn vax(
    country: &str,
    d: &str,
    people_fully_vaccinated: Option<u64>,
    population: Option<u64>,
) -> VaccinationRecord {
    VaccinationRecord {
        country: country.to_string(),
        date: date(d),
        total_vaccinations: None,
        people_vaccinated: None,
        people_fully_vaccinated,
        population,
        reproduction_rate: None,
    }
}
