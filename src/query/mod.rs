//! Query facade over the record store.
//!
//! The combined table is materialized once when the engine is built; every
//! operation is a read-only derivation over that snapshot, so the engine can
//! also run the four combined-table consumers as a fork-join with no shared
//! mutable state.

pub mod aggregate;
pub mod correlate;
pub mod join;
pub mod rank;
pub mod trend;

// Re-exports for convenience
pub use aggregate::CountryAggregate;
pub use join::combine;
pub use rank::RankedRow;
pub use trend::TrendRow;

use serde::Serialize;

use crate::error::Result;
use crate::record::{CombinedRecord, RecordStore};

/// Parameters for a full query snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotParams {
    /// Minimum case count (strict) for ranking and correlation.
    pub min_cases: u64,
    /// Maximum number of ranked countries to return.
    pub limit: usize,
    /// Minimum average full-vaccination rate (strict) for aggregates.
    pub min_avg_vaccination_rate: f64,
}

impl Default for SnapshotParams {
    fn default() -> Self {
        SnapshotParams {
            min_cases: 1000,
            limit: 10,
            min_avg_vaccination_rate: 20.0,
        }
    }
}

/// Results of the four combined-table consumers, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySnapshot {
    pub trend: Vec<TrendRow>,
    pub top_death_percentage: Vec<RankedRow>,
    pub aggregates: Vec<CountryAggregate>,
    /// Pearson coefficient, absent when undefined for this dataset.
    pub correlation: Option<f64>,
    /// Why `correlation` is absent, when it is.
    pub correlation_note: Option<String>,
}

/// Facade exposing the five analytical operations over a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: RecordStore,
    combined: Vec<CombinedRecord>,
}

impl QueryEngine {
    /// Build the engine, materializing the combined table once.
    pub fn new(store: RecordStore) -> Self {
        let combined = join::combine(store.cases(), store.vaccinations());
        log::info!(
            "combined table materialized: {} of {} case rows matched",
            combined.len(),
            store.cases().len()
        );
        QueryEngine { store, combined }
    }

    /// The input tables.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The materialized inner join of the two input tables.
    pub fn combined(&self) -> &[CombinedRecord] {
        &self.combined
    }

    /// All combined records ordered by country, then date.
    pub fn trend(&self) -> Vec<TrendRow> {
        trend::trend(&self.combined)
    }

    /// Top `limit` countries by maximum death percentage.
    pub fn top_death_percentage(&self, min_cases: u64, limit: usize) -> Vec<RankedRow> {
        rank::top_death_percentage(&self.combined, min_cases, limit)
    }

    /// Per-country metric averages above the vaccination-rate threshold.
    pub fn aggregate(&self, min_avg_vaccination_rate: f64) -> Vec<CountryAggregate> {
        aggregate::aggregate(&self.combined, min_avg_vaccination_rate)
    }

    /// Pearson correlation between death percentage and full-vaccination
    /// rate.
    pub fn correlate(&self, min_cases: u64) -> Result<f64> {
        correlate::correlate(&self.combined, min_cases)
    }

    /// Run the four combined-table consumers as a fork-join over the shared
    /// immutable snapshot.
    ///
    /// An undefined correlation is carried in the snapshot as a diagnostic
    /// note rather than failing the other three results.
    pub fn snapshot(&self, params: SnapshotParams) -> QuerySnapshot {
        let combined = self.combined.as_slice();
        let ((trend, top), (aggregates, correlation)) = rayon::join(
            || {
                rayon::join(
                    || trend::trend(combined),
                    || rank::top_death_percentage(combined, params.min_cases, params.limit),
                )
            },
            || {
                rayon::join(
                    || aggregate::aggregate(combined, params.min_avg_vaccination_rate),
                    || correlate::correlate(combined, params.min_cases),
                )
            },
        );

        let (correlation, correlation_note) = match correlation {
            Ok(r) => (Some(r), None),
            Err(err) => (None, Some(err.to_string())),
        };

        QuerySnapshot {
            trend,
            top_death_percentage: top,
            aggregates,
            correlation,
            correlation_note,
        }
    }
}
