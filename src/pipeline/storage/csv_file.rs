use std::path::Path;
use tracing::{info, instrument};

use crate::common::constants::BANKS_TABLE_COLUMNS;
use crate::common::error::Result;
use crate::common::types::{BanksTable, EnrichedBankRecord};

/// Shortest round-trippable form, keeping `.0` on integral values (`80.0`, not `80`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Overwrite `path` with the table, preceded by an unnamed positional-index column.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn load_to_csv(path: &Path, table: &[EnrichedBankRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![""];
    header.extend(BANKS_TABLE_COLUMNS);
    wtr.write_record(&header)?;

    for (index, row) in table.iter().enumerate() {
        wtr.write_record(&[
            index.to_string(),
            row.name.clone(),
            format_float(row.mc_usd_billion),
            format_float(row.mc_gbp_billion),
            format_float(row.mc_eur_billion),
            format_float(row.mc_inr_billion),
        ])?;
    }
    wtr.flush()?;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Read a file written by [`load_to_csv`], dropping the index column.
pub fn read_csv(path: &Path) -> Result<BanksTable> {
    let mut rdr = csv::Reader::from_path(path)?;

    let mut table = Vec::new();
    for result in rdr.deserialize() {
        let (_index, name, usd, gbp, eur, inr): (usize, String, f64, f64, f64, f64) = result?;
        table.push(EnrichedBankRecord {
            name,
            mc_usd_billion: usd,
            mc_gbp_billion: gbp,
            mc_eur_billion: eur,
            mc_inr_billion: inr,
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> BanksTable {
        vec![
            EnrichedBankRecord {
                name: "JPMorgan Chase".to_string(),
                mc_usd_billion: 432.92,
                mc_gbp_billion: 346.34,
                mc_eur_billion: 402.62,
                mc_inr_billion: 35910.71,
            },
            EnrichedBankRecord {
                name: "Bank A, Ltd".to_string(),
                mc_usd_billion: 100.0,
                mc_gbp_billion: 80.0,
                mc_eur_billion: 93.0,
                mc_inr_billion: 8295.0,
            },
        ]
    }

    #[test]
    fn test_layout_has_index_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Largest_banks_data.csv");
        load_to_csv(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], ",Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion");
        assert_eq!(lines[1], "0,JPMorgan Chase,432.92,346.34,402.62,35910.71");
        assert_eq!(lines[2], "1,\"Bank A, Ltd\",100.0,80.0,93.0,8295.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_read_back_yields_same_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("banks.csv");
        let table = sample();

        load_to_csv(&path, &table).unwrap();
        assert_eq!(read_csv(&path).unwrap(), table);
    }

    #[test]
    fn test_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("banks.csv");
        load_to_csv(&path, &sample()).unwrap();
        load_to_csv(&path, &sample()[..1]).unwrap();

        assert_eq!(read_csv(&path).unwrap().len(), 1);
    }
}
