// Pipeline ingestion: exchange rates and the scraped banks table

pub mod extract;
pub mod rates;
pub mod row_parser;
