// Pipeline storage: flat-file and relational loaders for the enriched table

pub mod csv_file;
pub mod sqlite;

pub use csv_file::{load_to_csv, read_csv};
pub use sqlite::{load_to_db, quote_identifier, read_table};
