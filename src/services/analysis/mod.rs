//! Pure analysis over an in-memory [`Dataset`](crate::models::Dataset).
//!
//! Every function here reads a dataset plus caller-owned parameters and returns fresh
//! values; nothing is cached or mutated.

pub mod categorical;
pub mod charts;
pub mod classifier;
pub mod numeric;
pub mod overview;
pub mod table;
pub mod types;
pub mod utils;

pub use categorical::categorical_summaries;
pub use charts::{build_projection, pie_buckets, resolve_selection};
pub use classifier::classify_columns;
pub use numeric::{numeric_stats, numeric_summaries};
pub use overview::dataset_overview;
pub use table::{filter_records, preview, table_page};
pub use types::*;
