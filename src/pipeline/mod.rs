// Data processing pipeline: ingestion, processing, storage and the office queries

pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod query;
pub mod storage;

// Re-export key types and functions from each stage
pub use ingestion::extract::{Extractor, HttpPageSource, PageResponse, PageSource};
pub use ingestion::rates::load_exchange_rates;
pub use ingestion::row_parser::{ArchivedWikipediaRowParser, RowParser};
pub use pipeline::{Pipeline, RunSummary};
pub use processing::transform::transform;
pub use query::{
    query_for_berlin_office, query_for_london_office, query_for_newdelhi_office, query_office, Office,
    OfficeView,
};
