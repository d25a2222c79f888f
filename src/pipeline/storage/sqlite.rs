use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{info, instrument};

use crate::common::constants::{MC_EUR_COLUMN, MC_GBP_COLUMN, MC_INR_COLUMN, MC_USD_COLUMN, NAME_COLUMN};
use crate::common::error::Result;
use crate::common::types::{BanksTable, EnrichedBankRecord};

/// Quote `name` as an SQL identifier; embedded quotes are doubled.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list() -> String {
    [NAME_COLUMN, MC_USD_COLUMN, MC_GBP_COLUMN, MC_EUR_COLUMN, MC_INR_COLUMN]
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replace the whole of `table_name` with `table`.
///
/// Drop, create and insert run in one transaction, so a failed load leaves the
/// previous contents in place.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn load_to_db(db_path: &Path, table_name: &str, table: &[EnrichedBankRecord]) -> Result<()> {
    let mut conn = Connection::open(db_path)?;
    let ident = quote_identifier(table_name);

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        r#"
        DROP TABLE IF EXISTS {ident};
        CREATE TABLE {ident} (
            "{NAME_COLUMN}"   TEXT,
            "{MC_USD_COLUMN}" REAL,
            "{MC_GBP_COLUMN}" REAL,
            "{MC_EUR_COLUMN}" REAL,
            "{MC_INR_COLUMN}" REAL
        );
        "#
    ))?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {ident} ({}) VALUES (?1, ?2, ?3, ?4, ?5)",
            column_list()
        ))?;
        for row in table {
            stmt.execute(params![
                row.name,
                row.mc_usd_billion,
                row.mc_gbp_billion,
                row.mc_eur_billion,
                row.mc_inr_billion
            ])?;
        }
    }
    tx.commit()?;

    info!("Replaced table {} with {} rows", table_name, table.len());
    Ok(())
}

/// Every stored row, in insertion order.
pub fn read_table(db_path: &Path, table_name: &str) -> Result<BanksTable> {
    let conn = Connection::open(db_path)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} ORDER BY rowid",
        column_list(),
        quote_identifier(table_name)
    ))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(EnrichedBankRecord {
                name: row.get(0)?,
                mc_usd_billion: row.get(1)?,
                mc_gbp_billion: row.get(2)?,
                mc_eur_billion: row.get(3)?,
                mc_inr_billion: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
