pub mod error;
pub mod io;
pub mod query;
pub mod record;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
pub use query::{CountryAggregate, QueryEngine, QuerySnapshot, RankedRow, SnapshotParams, TrendRow};
pub use record::{CaseRecord, CombinedRecord, RecordStore, VaccinationRecord};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
