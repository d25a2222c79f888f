use crate::common::constants::{MC_USD_COLUMN, NAME_COLUMN};

/// Units of each currency per one USD, loaded once from the exchange-rate file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRates {
    pub gbp: f64,
    pub eur: f64,
    pub inr: f64,
}

/// One data row of the source table
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub name: String,
    pub mc_usd_billion: f64,
}

/// A single cell of a [`BankFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

/// Column-named table handed to the transformer.
///
/// Extraction always yields the `Name, MC_USD_Billion` shape, but the frame keeps
/// columns dynamic so a frame lacking a column, or holding text where a number is
/// expected, is reported as such instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl BankFrame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_records(records: &[BankRecord]) -> Self {
        let mut frame = Self::new(vec![NAME_COLUMN.to_string(), MC_USD_COLUMN.to_string()]);
        for record in records {
            frame.rows.push(vec![
                CellValue::Text(record.name.clone()),
                CellValue::Number(record.mc_usd_billion),
            ]);
        }
        frame
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A bank row with its market cap converted into the three office currencies
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBankRecord {
    pub name: String,
    pub mc_usd_billion: f64,
    pub mc_gbp_billion: f64,
    pub mc_eur_billion: f64,
    pub mc_inr_billion: f64,
}

/// Enriched rows in page order.
pub type BanksTable = Vec<EnrichedBankRecord>;

/// One line of the progress log
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    /// `<timestamp>,<message>`, the on-disk form without the newline
    pub fn to_line(&self) -> String {
        format!("{},{}", self.timestamp, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_from_records_keeps_order() {
        let records = vec![
            BankRecord {
                name: "JPMorgan Chase".to_string(),
                mc_usd_billion: 432.92,
            },
            BankRecord {
                name: "Bank of America".to_string(),
                mc_usd_billion: 231.52,
            },
        ];

        let frame = BankFrame::from_records(&records);

        assert_eq!(frame.columns, vec!["Name", "MC_USD_Billion"]);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.rows[1][0].as_text(), Some("Bank of America"));
        assert_eq!(frame.rows[0][1].as_number(), Some(432.92));
        assert_eq!(frame.column_index("MC_USD_Billion"), Some(1));
        assert_eq!(frame.column_index("MC_GBP_Billion"), None);
    }

    #[test]
    fn test_log_entry_line() {
        let entry = LogEntry {
            timestamp: "2023-Sep-08-09:16:35".to_string(),
            message: "Starting ETL Process.".to_string(),
        };
        assert_eq!(entry.to_line(), "2023-Sep-08-09:16:35,Starting ETL Process.");
    }
}
