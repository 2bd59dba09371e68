// Driver binary: load the two CSV tables and print the query results.

use std::env;
use std::process;

use covidrs::io::csv::{read_cases_csv, read_vaccinations_csv, CsvLoad};
use covidrs::query::{QueryEngine, SnapshotParams};
use covidrs::record::RecordStore;

// Trend rows shown before the listing is cut off
const MAX_TREND_ROWS: usize = 10;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <cases.csv> <vaccinations.csv>", args[0]);
        process::exit(2);
    }

    if let Err(err) = run(&args[1], &args[2]) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(cases_path: &str, vaccinations_path: &str) -> covidrs::Result<()> {
    let cases = read_cases_csv(cases_path)?;
    let vaccinations = read_vaccinations_csv(vaccinations_path)?;

    print_load_summary("cases", cases_path, &cases);
    print_load_summary("vaccinations", vaccinations_path, &vaccinations);

    let store = RecordStore::new(cases.records, vaccinations.records)?;
    let engine = QueryEngine::new(store);
    let params = SnapshotParams::default();
    let snapshot = engine.snapshot(params);

    println!(
        "\ncombined table: {} records ({} countries ranked, limit {})",
        engine.combined().len(),
        snapshot.top_death_percentage.len(),
        params.limit
    );

    println!(
        "\ntrend (first {} of {} rows):",
        snapshot.trend.len().min(MAX_TREND_ROWS),
        snapshot.trend.len()
    );
    println!(
        "{:<20} {:<12} {:>12} {:>12} {:>8}",
        "country", "date", "cases", "deaths", "death%"
    );
    for row in snapshot.trend.iter().take(MAX_TREND_ROWS) {
        println!(
            "{:<20} {:<12} {:>12} {:>12} {:>8}",
            row.country,
            row.date.to_string(),
            row.total_cases,
            row.total_deaths,
            fmt_opt(row.death_percentage)
        );
    }

    println!("\ntop death percentage (cases > {}):", params.min_cases);
    println!(
        "{:<20} {:<12} {:>12} {:>12} {:>8}",
        "country", "date", "cases", "deaths", "death%"
    );
    for row in &snapshot.top_death_percentage {
        println!(
            "{:<20} {:<12} {:>12} {:>12} {:>8.2}",
            row.country,
            row.date.to_string(),
            row.total_cases,
            row.total_deaths,
            row.death_percentage
        );
    }

    println!(
        "\naggregates (avg vaccination rate > {}):",
        params.min_avg_vaccination_rate
    );
    println!("{:<20} {:>12} {:>12}", "country", "avg death%", "avg vax%");
    for row in &snapshot.aggregates {
        println!(
            "{:<20} {:>12} {:>12.2}",
            row.country,
            fmt_opt(row.avg_death_percentage),
            row.avg_full_vaccination_rate
        );
    }

    match (snapshot.correlation, &snapshot.correlation_note) {
        (Some(r), _) => println!("\ncorrelation (death% vs vax%): {:.4}", r),
        (None, Some(note)) => println!("\ncorrelation (death% vs vax%): undefined ({})", note),
        (None, None) => println!("\ncorrelation (death% vs vax%): undefined"),
    }

    Ok(())
}

fn print_load_summary<T>(table: &str, path: &str, load: &CsvLoad<T>) {
    println!("{}: {} records from {}", table, load.records.len(), path);
    for row in &load.rejected {
        println!("  rejected line {}: {}", row.line, row.reason);
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "NA".to_string(),
    }
}
