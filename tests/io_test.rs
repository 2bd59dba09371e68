mod common;

use std::fs;
use std::io::Write;

use common::{case, date};
use covidrs::io::csv::{read_cases_csv, read_vaccinations_csv, write_csv};
use covidrs::io::json::write_json;
use covidrs::query::{join, trend};
use covidrs::Error;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_read_cases_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "cases.csv",
        "country,date,total_cases,total_deaths\n\
         Japan,2021-03-01,1000,50\n\
         Japan,2021-03-02,1100,52\n",
    );

    let load = read_cases_csv(&path).unwrap();
    assert_eq!(load.records.len(), 2);
    assert!(load.rejected.is_empty());
    assert_eq!(load.records[0], case("Japan", "2021-03-01", 1000, 50));
}

#[test]
fn test_read_cases_rejects_bad_rows_individually() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "cases.csv",
        "country,date,total_cases,total_deaths\n\
         Japan,2021-03-01,1000,50\n\
         ,2021-03-02,1100,52\n\
         Japan,2021-03-03,not-a-number,52\n\
         Japan,2021-03-04,1200,\n\
         Japan,2021-03-01,1300,55\n",
    );

    let load = read_cases_csv(&path).unwrap();
    // Good rows survive a bad neighbor
    assert_eq!(load.records.len(), 1);
    assert_eq!(load.records[0].country, "Japan");

    // Missing country, bad number, missing deaths, duplicate key
    assert_eq!(load.rejected.len(), 4);
    assert_eq!(load.rejected[0].line, 3);
    assert!(load.rejected[0].reason.contains("country"));
    assert!(load.rejected[1].reason.contains("total_cases"));
    assert!(load.rejected[2].reason.contains("total_deaths"));
    assert!(load.rejected[3].reason.contains("duplicate key"));
}

#[test]
fn test_read_cases_missing_column_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "cases.csv",
        "country,date,total_cases\nJapan,2021-03-01,1000\n",
    );

    assert!(matches!(
        read_cases_csv(&path),
        Err(Error::MissingColumn(_))
    ));
}

#[test]
fn test_read_vaccinations_optional_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "vax.csv",
        "country,date,total_vaccinations,people_vaccinated,people_fully_vaccinated,population,reproduction_rate\n\
         Japan,2021-03-01,2000,800,500,1000,1.1\n\
         Japan,2021-03-02,,,,,\n",
    );

    let load = read_vaccinations_csv(&path).unwrap();
    assert_eq!(load.records.len(), 2);
    assert!(load.rejected.is_empty());

    assert_eq!(load.records[0].people_fully_vaccinated, Some(500));
    assert_eq!(load.records[0].population, Some(1000));
    assert_eq!(load.records[0].reproduction_rate, Some(1.1));

    // Empty optional fields parse to None, not zero
    assert_eq!(load.records[1].total_vaccinations, None);
    assert_eq!(load.records[1].people_fully_vaccinated, None);
    assert_eq!(load.records[1].population, None);
    assert_eq!(load.records[1].reproduction_rate, None);
}

#[test]
fn test_read_vaccinations_garbage_optional_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "vax.csv",
        "country,date,population\n\
         Japan,2021-03-01,abc\n\
         Japan,2021-03-02,1000\n",
    );

    let load = read_vaccinations_csv(&path).unwrap();
    assert_eq!(load.records.len(), 1);
    assert_eq!(load.records[0].date, date("2021-03-02"));
    assert_eq!(load.rejected.len(), 1);
    assert!(load.rejected[0].reason.contains("population"));
}

#[test]
fn test_write_csv_roundtrip_through_text() {
    let dir = TempDir::new().unwrap();

    let cases = vec![case("Japan", "2021-03-01", 1000, 50)];
    let vaccinations = vec![common::vax("Japan", "2021-03-01", Some(500), Some(1000))];
    let rows = trend::trend(&join::combine(&cases, &vaccinations));

    let path = dir.path().join("trend.csv");
    write_csv(&rows, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "country,date,total_cases,total_deaths,death_percentage"
    );
    assert_eq!(lines.next().unwrap(), "Japan,2021-03-01,1000,50,5.0");
}

#[test]
fn test_write_json() {
    let cases = vec![case("Japan", "2021-03-01", 1000, 50)];
    let vaccinations = vec![common::vax("Japan", "2021-03-01", Some(500), Some(1000))];
    let rows = trend::trend(&join::combine(&cases, &vaccinations));

    let mut buf = Vec::new();
    write_json(&rows, &mut buf).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed[0]["country"], "Japan");
    assert_eq!(parsed[0]["death_percentage"], 5.0);
}
