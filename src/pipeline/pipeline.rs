use tracing::{error, info, instrument};

use crate::common::constants::*;
use crate::common::error::{EtlError, Result};
use crate::common::types::{BankFrame, BankRecord, BanksTable, ExchangeRates};
use crate::config::EtlConfig;
use crate::pipeline::ingestion::extract::Extractor;
use crate::pipeline::ingestion::rates::load_exchange_rates;
use crate::pipeline::processing::transform::transform;
use crate::pipeline::query::{query_office, Office, OfficeView};
use crate::pipeline::storage::{load_to_csv, load_to_db};
use crate::progress::ProgressLogger;

/// Outcome of a complete run
#[derive(Debug)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub offices: Vec<OfficeView>,
}

/// Rate load, extract, transform, load to CSV and SQLite, then the office queries.
pub struct Pipeline {
    config: EtlConfig,
    extractor: Extractor,
    logger: ProgressLogger,
    print_results: bool,
}

impl Pipeline {
    pub fn new(config: EtlConfig, extractor: Extractor, logger: ProgressLogger) -> Self {
        Self {
            config,
            extractor,
            logger,
            print_results: true,
        }
    }

    /// HTTP extraction and a file-backed progress log, as configured.
    pub fn from_config(config: EtlConfig) -> Result<Self> {
        let extractor = Extractor::archived_wikipedia(config.url.clone(), config.timeout())?;
        let logger = ProgressLogger::to_file(&config.log_path);
        Ok(Self::new(config, extractor, logger))
    }

    /// Do not print office query results to stdout
    pub fn quiet(mut self) -> Self {
        self.print_results = false;
        self
    }

    #[instrument(skip(self), fields(table = %self.config.table_name))]
    pub fn run(&self) -> Result<RunSummary> {
        // Rates come first; a bad rate file aborts before anything is logged.
        let rates = load_exchange_rates(&self.config.exchange_rate_path)?;

        self.logger.log_progress(MSG_ETL_START)?;

        let records = self.extract_step()?;
        if records.is_empty() {
            error!("Nothing extracted, leaving {} untouched", self.config.table_name);
            return Err(EtlError::NoRecords);
        }

        let table = self.transform_step(&BankFrame::from_records(&records), &rates)?;

        self.logger.log_progress(MSG_CSV_START)?;
        load_to_csv(&self.config.csv_path, &table)?;
        self.logger.log_progress(MSG_CSV_DONE)?;

        self.logger.log_progress(MSG_DB_START)?;
        load_to_db(&self.config.db_path, &self.config.table_name, &table)?;
        self.logger.log_progress(MSG_DB_DONE)?;

        let mut offices = Vec::with_capacity(Office::ALL.len());
        for office in Office::ALL {
            self.logger.log_progress(&office.query_started_message())?;
            let view = query_office(&self.config.db_path, &self.config.table_name, office)?;
            if self.print_results {
                println!("{}", view);
            }
            self.logger.log_progress(&office.query_done_message())?;
            offices.push(view);
        }

        self.logger.log_progress(MSG_ETL_DONE)?;
        info!("ETL run loaded {} rows", table.len());

        Ok(RunSummary {
            rows_loaded: table.len(),
            offices,
        })
    }

    pub fn extract_step(&self) -> Result<Vec<BankRecord>> {
        self.logger.log_progress(MSG_EXTRACT_START)?;
        let records = match self.extractor.extract() {
            Ok(records) => records,
            Err(e @ EtlError::Http(_)) => {
                error!("Extraction request failed: {}", e);
                self.logger.log_progress(MSG_REQUEST_FAILED)?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.logger.log_progress(MSG_EXTRACT_DONE)?;
        Ok(records)
    }

    /// Convert `frame`; on failure the human-readable reason is logged and returned.
    pub fn transform_step(&self, frame: &BankFrame, rates: &ExchangeRates) -> Result<BanksTable> {
        self.logger.log_progress(MSG_TRANSFORM_START)?;
        let table = match transform(frame, rates) {
            Ok(table) => table,
            Err(e) => {
                error!("Transformation failed: {:?}", e);
                self.logger.log_progress(&e.to_string())?;
                return Err(e.into());
            }
        };
        self.logger.log_progress(MSG_TRANSFORM_DONE)?;
        Ok(table)
    }
}
