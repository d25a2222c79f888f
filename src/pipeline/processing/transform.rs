use tracing::{debug, instrument};

use crate::common::constants::{MC_USD_COLUMN, NAME_COLUMN};
use crate::common::error::TransformError;
use crate::common::types::{BankFrame, BanksTable, EnrichedBankRecord, ExchangeRates};

/// Round to two decimals, ties to even (`round(x, 2)` semantics).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Add GBP, EUR and INR market caps to every row of `frame`.
///
/// Fails with `MissingColumn` when `MC_USD_Billion` (or `Name`) is absent, and with
/// `WrongType` when a cell in either column holds the wrong kind of value.
#[instrument(skip_all, fields(rows = frame.len()))]
pub fn transform(frame: &BankFrame, rates: &ExchangeRates) -> Result<BanksTable, TransformError> {
    let usd_idx = frame
        .column_index(MC_USD_COLUMN)
        .ok_or_else(TransformError::missing_usd_column)?;
    let name_idx = frame
        .column_index(NAME_COLUMN)
        .ok_or_else(|| TransformError::MissingColumn {
            column: NAME_COLUMN.to_string(),
        })?;

    let mut table = Vec::with_capacity(frame.len());
    for (i, row) in frame.rows.iter().enumerate() {
        let usd = row
            .get(usd_idx)
            .and_then(|c| c.as_number())
            .ok_or_else(|| TransformError::WrongType {
                column: MC_USD_COLUMN.to_string(),
                row: i,
            })?;
        let name = row
            .get(name_idx)
            .and_then(|c| c.as_text())
            .ok_or_else(|| TransformError::WrongType {
                column: NAME_COLUMN.to_string(),
                row: i,
            })?;

        table.push(EnrichedBankRecord {
            name: name.to_string(),
            mc_usd_billion: usd,
            mc_gbp_billion: round2(usd * rates.gbp),
            mc_eur_billion: round2(usd * rates.eur),
            mc_inr_billion: round2(usd * rates.inr),
        });
    }

    debug!("Converted {} rows", table.len());
    Ok(table)
}
