pub mod csv;
pub mod json;

// Re-export commonly used functions
pub use self::csv::{read_cases_csv, read_vaccinations_csv, write_csv, CsvLoad, RejectedRow};
pub use self::json::{write_json, write_json_file};
