//! CSV ingestion and emission for the record tables.
//!
//! Loading is tolerant at the row level: a row missing a required field,
//! carrying an unparseable value, or repeating a `(country, date)` key is
//! collected in the load result's `rejected` list and skipped. It is never
//! silently included or silently dropped. File-level problems (unreadable
//! file, missing required column) fail the whole load.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{Error, Result};
use crate::record::{CaseRecord, VaccinationRecord};

/// Result of loading one CSV table.
#[derive(Debug, Clone)]
pub struct CsvLoad<T> {
    /// Successfully parsed records, in file order.
    pub records: Vec<T>,
    /// Rows skipped during loading, with the reason for each.
    pub rejected: Vec<RejectedRow>,
}

/// A row skipped during loading.
#[derive(Debug, Clone)]
pub struct RejectedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub reason: String,
}

/// Read the case/death table from a CSV file.
///
/// Requires `country`, `date`, `total_cases`, and `total_deaths` columns.
pub fn read_cases_csv<P: AsRef<Path>>(path: P) -> Result<CsvLoad<CaseRecord>> {
    read_table(
        path.as_ref(),
        &["country", "date", "total_cases", "total_deaths"],
        parse_case_row,
        |rec| (rec.country.clone(), rec.date),
    )
}

/// Read the vaccination table from a CSV file.
///
/// Requires `country` and `date` columns; the numeric columns are optional
/// and parse to `None` when the field is empty or the column is absent.
pub fn read_vaccinations_csv<P: AsRef<Path>>(path: P) -> Result<CsvLoad<VaccinationRecord>> {
    read_table(
        path.as_ref(),
        &["country", "date"],
        parse_vaccination_row,
        |rec| (rec.country.clone(), rec.date),
    )
}

/// Write a result table as CSV with a header row.
pub fn write_csv<T: serde::Serialize, P: AsRef<Path>>(rows: &[T], path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut wtr = Writer::from_writer(file);

    for row in rows {
        wtr.serialize(row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

fn read_table<T, P, K>(
    path: &Path,
    required: &[&str],
    parse: P,
    key: K,
) -> Result<CsvLoad<T>>
where
    P: Fn(&Columns, &StringRecord) -> std::result::Result<T, String>,
    K: Fn(&T) -> (String, NaiveDate),
{
    let file = File::open(path).map_err(Error::Io)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns = Columns::new(rdr.headers().map_err(Error::Csv)?, required)?;

    let mut load = CsvLoad {
        records: Vec::new(),
        rejected: Vec::new(),
    };
    let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        match parse(&columns, &record) {
            Ok(rec) => {
                let rec_key = key(&rec);
                if seen.contains(&rec_key) {
                    // First occurrence wins
                    reject(
                        &mut load.rejected,
                        line,
                        format!("duplicate key ({}, {})", rec_key.0, rec_key.1),
                    );
                } else {
                    seen.insert(rec_key);
                    load.records.push(rec);
                }
            }
            Err(reason) => reject(&mut load.rejected, line, reason),
        }
    }

    log::info!(
        "loaded {} records from {} ({} rejected)",
        load.records.len(),
        path.display(),
        load.rejected.len()
    );

    Ok(load)
}

fn reject(rejected: &mut Vec<RejectedRow>, line: u64, reason: String) {
    log::warn!("rejecting line {}: {}", line, reason);
    rejected.push(RejectedRow { line, reason });
}

/// Column-name to field-index mapping for one file.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord, required: &[&str]) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.to_string()).or_insert(i);
        }

        for name in required {
            if !index.contains_key(*name) {
                return Err(Error::MissingColumn((*name).to_string()));
            }
        }

        Ok(Columns { index })
    }

    /// The trimmed field value, with empty fields mapped to `None`.
    fn get<'a>(&self, record: &'a StringRecord, name: &str) -> Option<&'a str> {
        let idx = *self.index.get(name)?;
        match record.get(idx) {
            Some(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

fn parse_case_row(cols: &Columns, record: &StringRecord) -> std::result::Result<CaseRecord, String> {
    Ok(CaseRecord {
        country: required(cols.get(record, "country"), "country")?.to_string(),
        date: parse_date(required(cols.get(record, "date"), "date")?)?,
        total_cases: parse_u64(required(cols.get(record, "total_cases"), "total_cases")?, "total_cases")?,
        total_deaths: parse_u64(required(cols.get(record, "total_deaths"), "total_deaths")?, "total_deaths")?,
    })
}

fn parse_vaccination_row(
    cols: &Columns,
    record: &StringRecord,
) -> std::result::Result<VaccinationRecord, String> {
    Ok(VaccinationRecord {
        country: required(cols.get(record, "country"), "country")?.to_string(),
        date: parse_date(required(cols.get(record, "date"), "date")?)?,
        total_vaccinations: parse_opt_u64(cols.get(record, "total_vaccinations"), "total_vaccinations")?,
        people_vaccinated: parse_opt_u64(cols.get(record, "people_vaccinated"), "people_vaccinated")?,
        people_fully_vaccinated: parse_opt_u64(
            cols.get(record, "people_fully_vaccinated"),
            "people_fully_vaccinated",
        )?,
        population: parse_opt_u64(cols.get(record, "population"), "population")?,
        reproduction_rate: parse_opt_f64(cols.get(record, "reproduction_rate"), "reproduction_rate")?,
    })
}

fn required<'a>(value: Option<&'a str>, field: &str) -> std::result::Result<&'a str, String> {
    value.ok_or_else(|| format!("missing required field '{}'", field))
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{}': {}", value, err))
}

fn parse_u64(value: &str, field: &str) -> std::result::Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|err| format!("invalid {} '{}': {}", field, value, err))
}

fn parse_opt_u64(value: Option<&str>, field: &str) -> std::result::Result<Option<u64>, String> {
    match value {
        None => Ok(None),
        Some(raw) => parse_u64(raw, field).map(Some),
    }
}

fn parse_opt_f64(value: Option<&str>, field: &str) -> std::result::Result<Option<f64>, String> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|err| format!("invalid {} '{}': {}", field, raw, err)),
    }
}
