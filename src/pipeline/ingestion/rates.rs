use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

use crate::common::constants::{EUR, GBP, INR};
use crate::common::error::{EtlError, Result};
use crate::common::types::ExchangeRates;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Read a `Currency,Rate` file and pick the GBP, EUR and INR rates.
///
/// The first row for a code wins; later rows for the same code are ignored.
#[instrument]
pub fn load_exchange_rates(path: &Path) -> Result<ExchangeRates> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RateRow = result?;
        rows.push(row);
    }
    debug!("Read {} exchange-rate rows", rows.len());

    Ok(ExchangeRates {
        gbp: first_rate(&rows, GBP)?,
        eur: first_rate(&rows, EUR)?,
        inr: first_rate(&rows, INR)?,
    })
}

fn first_rate(rows: &[RateRow], currency: &str) -> Result<f64> {
    let rate = rows
        .iter()
        .find(|r| r.currency == currency)
        .map(|r| r.rate)
        .ok_or_else(|| EtlError::MissingRate(currency.to_string()))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(EtlError::InvalidRate {
            currency: currency.to_string(),
            rate,
        });
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_rates(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exchange_rate.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_loads_three_rates() {
        let (_dir, path) = write_rates("Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,82.95\n");
        let rates = load_exchange_rates(&path).unwrap();
        assert_eq!(
            rates,
            ExchangeRates {
                gbp: 0.8,
                eur: 0.93,
                inr: 82.95
            }
        );
    }

    #[test]
    fn test_first_matching_row_wins() {
        let (_dir, path) =
            write_rates("Currency,Rate\nGBP,0.8\nUSD,1.0\nGBP,0.5\nEUR,0.93\nINR,82.95\nEUR,2.0\n");
        let rates = load_exchange_rates(&path).unwrap();
        assert_eq!(rates.gbp, 0.8);
        assert_eq!(rates.eur, 0.93);
    }

    #[test]
    fn test_missing_code_is_error() {
        let (_dir, path) = write_rates("Currency,Rate\nEUR,0.93\nGBP,0.8\n");
        match load_exchange_rates(&path) {
            Err(EtlError::MissingRate(code)) => assert_eq!(code, "INR"),
            other => panic!("expected missing INR, got {other:?}"),
        }
    }

    #[test]
    fn test_code_match_is_exact() {
        let (_dir, path) = write_rates("Currency,Rate\ngbp,0.8\nEUR,0.93\nINR,82.95\n");
        assert!(matches!(load_exchange_rates(&path), Err(EtlError::MissingRate(_))));
    }

    #[test]
    fn test_malformed_rate_is_error() {
        let (_dir, path) = write_rates("Currency,Rate\nEUR,abc\nGBP,0.8\nINR,82.95\n");
        assert!(matches!(load_exchange_rates(&path), Err(EtlError::Csv(_))));
    }

    #[test]
    fn test_non_positive_rate_is_error() {
        let (_dir, path) = write_rates("Currency,Rate\nEUR,0.93\nGBP,0\nINR,82.95\n");
        assert!(matches!(load_exchange_rates(&path), Err(EtlError::InvalidRate { .. })));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = load_exchange_rates(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(EtlError::Csv(_))));
    }
}
