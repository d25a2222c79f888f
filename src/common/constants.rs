/// Fixed names and locations used across the job.
/// Every value here can be overridden through `EtlConfig`; these are the defaults.

// Source page (archived so the table layout stays stable)
pub const SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

// Local files, relative to the working directory
pub const EXCHANGE_RATE_FILE: &str = "exchange_rate.csv";
pub const TARGET_CSV_FILE: &str = "Largest_banks_data.csv";
pub const PROGRESS_LOG_FILE: &str = "code_log.txt";
pub const CONFIG_FILE: &str = "banks_etl.toml";

// Relational store
pub const SQL_DB_NAME: &str = "Banks.db";
pub const SQL_TABLE_NAME: &str = "Largest_banks";

// Column names, shared by the CSV file and the SQL table
pub const NAME_COLUMN: &str = "Name";
pub const MC_USD_COLUMN: &str = "MC_USD_Billion";
pub const MC_GBP_COLUMN: &str = "MC_GBP_Billion";
pub const MC_EUR_COLUMN: &str = "MC_EUR_Billion";
pub const MC_INR_COLUMN: &str = "MC_INR_Billion";

/// Columns of the enriched table, in output order
pub const BANKS_TABLE_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    MC_USD_COLUMN,
    MC_GBP_COLUMN,
    MC_EUR_COLUMN,
    MC_INR_COLUMN,
];

// Currency codes looked up in the exchange-rate file
pub const GBP: &str = "GBP";
pub const EUR: &str = "EUR";
pub const INR: &str = "INR";

/// Timestamp layout of progress log lines, e.g. `2023-Sep-08-09:16:35`
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

// Progress messages
pub const MSG_ETL_START: &str = "Starting ETL Process.";
pub const MSG_ETL_DONE: &str = "ETL Process Completed.";
pub const MSG_EXTRACT_START: &str = "Starting Extraction Process.";
pub const MSG_EXTRACT_DONE: &str = "Extraction Process Completed.";
pub const MSG_REQUEST_FAILED: &str = "Request Exception Occurred.";
pub const MSG_TRANSFORM_START: &str = "Data Transformation Started.";
pub const MSG_TRANSFORM_DONE: &str = "Data Transformation Completed.";
pub const MSG_CSV_START: &str = "Loading Data to .csv .";
pub const MSG_CSV_DONE: &str = "Loading Data to .csv Completed.";
pub const MSG_DB_START: &str = "Loading Data to SQL Database.";
pub const MSG_DB_DONE: &str = "Loading Data to SQL Database Completed.";
