//! The three office queries run against the stored banks table.

use rusqlite::Connection;
use std::fmt;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, instrument};

use crate::common::constants::{MC_EUR_COLUMN, MC_GBP_COLUMN, MC_INR_COLUMN, NAME_COLUMN};
use crate::common::error::Result;
use crate::pipeline::storage::csv_file::format_float;
use crate::pipeline::storage::quote_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Office {
    London,
    Berlin,
    NewDelhi,
}

impl Office {
    pub const ALL: [Office; 3] = [Office::London, Office::Berlin, Office::NewDelhi];

    pub fn label(&self) -> &'static str {
        match self {
            Office::London => "London",
            Office::Berlin => "Berlin",
            Office::NewDelhi => "New Delhi",
        }
    }

    /// Market-cap column in the office's local currency
    pub fn currency_column(&self) -> &'static str {
        match self {
            Office::London => MC_GBP_COLUMN,
            Office::Berlin => MC_EUR_COLUMN,
            Office::NewDelhi => MC_INR_COLUMN,
        }
    }

    pub fn query_started_message(&self) -> String {
        format!("Querying Data for {} Office.", self.label())
    }

    pub fn query_done_message(&self) -> String {
        format!("Data Retrieved for {} Office.", self.label())
    }
}

/// Result set of one office query: bank names with one currency column
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeView {
    pub office: Office,
    pub rows: Vec<(String, f64)>,
}

impl OfficeView {
    pub fn columns(&self) -> [&'static str; 2] {
        [NAME_COLUMN, self.office.currency_column()]
    }

    pub fn to_table(&self) -> tabled::Table {
        let mut builder = Builder::new();
        let [name_col, value_col] = self.columns();
        builder.push_record(vec!["", name_col, value_col]);
        for (i, (name, value)) in self.rows.iter().enumerate() {
            builder.push_record(vec![i.to_string(), name.clone(), format_float(*value)]);
        }
        let mut table = builder.build();
        table.with(Style::empty());
        table
    }
}

impl fmt::Display for OfficeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

/// `SELECT Name, <currency column>` over the whole table, in stored order.
#[instrument(skip(db_path))]
pub fn query_office(db_path: &Path, table_name: &str, office: Office) -> Result<OfficeView> {
    let conn = Connection::open(db_path)?;
    let sql = format!(
        "SELECT {}, {} FROM {} ORDER BY rowid",
        quote_identifier(NAME_COLUMN),
        quote_identifier(office.currency_column()),
        quote_identifier(table_name)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!("{} office query returned {} rows", office.label(), rows.len());
    Ok(OfficeView { office, rows })
}

pub fn query_for_london_office(db_path: &Path, table_name: &str) -> Result<OfficeView> {
    query_office(db_path, table_name, Office::London)
}

pub fn query_for_berlin_office(db_path: &Path, table_name: &str) -> Result<OfficeView> {
    query_office(db_path, table_name, Office::Berlin)
}

pub fn query_for_newdelhi_office(db_path: &Path, table_name: &str) -> Result<OfficeView> {
    query_office(db_path, table_name, Office::NewDelhi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::EtlError;
    use crate::common::types::EnrichedBankRecord;
    use crate::pipeline::storage::load_to_db;
    use tempfile::tempdir;

    fn stored_table(db: &Path) {
        let rows = vec![
            EnrichedBankRecord {
                name: "Zeta Bank".to_string(),
                mc_usd_billion: 10.0,
                mc_gbp_billion: 8.0,
                mc_eur_billion: 9.3,
                mc_inr_billion: 829.5,
            },
            EnrichedBankRecord {
                name: "Alpha Bank".to_string(),
                mc_usd_billion: 100.0,
                mc_gbp_billion: 80.0,
                mc_eur_billion: 93.0,
                mc_inr_billion: 8295.0,
            },
        ];
        load_to_db(db, "Largest_banks", &rows).unwrap();
    }

    #[test]
    fn test_london_returns_name_and_gbp_in_stored_order() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("Banks.db");
        stored_table(&db);

        let view = query_for_london_office(&db, "Largest_banks").unwrap();

        assert_eq!(view.columns(), ["Name", "MC_GBP_Billion"]);
        assert_eq!(
            view.rows,
            vec![("Zeta Bank".to_string(), 8.0), ("Alpha Bank".to_string(), 80.0)]
        );
    }

    #[test]
    fn test_berlin_and_new_delhi_columns() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("Banks.db");
        stored_table(&db);

        let berlin = query_for_berlin_office(&db, "Largest_banks").unwrap();
        let delhi = query_for_newdelhi_office(&db, "Largest_banks").unwrap();

        assert_eq!(berlin.columns()[1], "MC_EUR_Billion");
        assert_eq!(berlin.rows[1].1, 93.0);
        assert_eq!(delhi.columns()[1], "MC_INR_Billion");
        assert_eq!(delhi.rows[0].1, 829.5);
    }

    #[test]
    fn test_missing_table_is_error() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("Banks.db");
        let result = query_for_london_office(&db, "Largest_banks");
        assert!(matches!(result, Err(EtlError::Sqlite(_))));
    }

    #[test]
    fn test_rendered_view_lists_every_row() {
        let view = OfficeView {
            office: Office::London,
            rows: vec![("Bank A".to_string(), 80.0), ("Bank B".to_string(), 8.5)],
        };
        let text = view.to_string();
        assert!(text.contains("MC_GBP_Billion"));
        assert!(text.contains("Bank A"));
        assert!(text.contains("8.5"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_progress_messages() {
        assert_eq!(Office::NewDelhi.query_started_message(), "Querying Data for New Delhi Office.");
        assert_eq!(Office::London.query_done_message(), "Data Retrieved for London Office.");
    }
}
