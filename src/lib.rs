//! Tabular data exploration service.
//!
//! Load a CSV or XLSX file (or the bundled sample) and explore it through column
//! classification, numeric and categorical summaries, chart projections and a searchable
//! paginated table. The analysis itself lives in [`services::analysis`] and is a set of
//! pure functions over a [`models::Dataset`]; the rest is ingestion, state and HTTP glue.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::dataset_store::DatasetStore;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub datasets: DatasetStore,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            datasets: DatasetStore::with_sample(),
        }
    }
}
