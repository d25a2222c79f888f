use scraper::{ElementRef, Selector};

use crate::common::error::{EtlError, Result};
use crate::common::types::BankRecord;

/// Turns one `<tr>` of the source table into a record.
///
/// `Ok(None)` means the row carries no data cells (header or separator) and is
/// skipped. Any other shape mismatch is an error.
pub trait RowParser {
    fn parse_row(&self, row: ElementRef<'_>) -> Result<Option<BankRecord>>;
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::RowLayout(format!("invalid selector '{css}': {e}")))
}

/// Layout of the archived "List of largest banks" page:
/// cell 1 rank, cell 2 flag link then name link, cell 3 market cap in USD billions.
pub struct ArchivedWikipediaRowParser {
    cell: Selector,
    link: Selector,
}

impl ArchivedWikipediaRowParser {
    const NAME_CELL: usize = 1;
    const NAME_LINK: usize = 1;
    const MARKET_CAP_CELL: usize = 2;

    pub fn new() -> Result<Self> {
        Ok(Self {
            cell: selector("td")?,
            link: selector("a")?,
        })
    }
}

impl RowParser for ArchivedWikipediaRowParser {
    fn parse_row(&self, row: ElementRef<'_>) -> Result<Option<BankRecord>> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();
        if cells.is_empty() {
            return Ok(None);
        }

        let name_cell = cells.get(Self::NAME_CELL).ok_or_else(|| {
            EtlError::RowLayout(format!("row has {} cells, expected a name cell", cells.len()))
        })?;
        let name = name_cell
            .select(&self.link)
            .nth(Self::NAME_LINK)
            .map(|a| a.text().collect::<String>().trim().to_string())
            .ok_or_else(|| EtlError::RowLayout("name cell is missing its second link".into()))?;
        if name.is_empty() {
            return Err(EtlError::RowLayout("bank name link is empty".into()));
        }

        let cap_cell = cells.get(Self::MARKET_CAP_CELL).ok_or_else(|| {
            EtlError::RowLayout(format!("row for '{}' has no market cap cell", name))
        })?;
        let cap_text = cap_cell.text().collect::<String>();
        let mc_usd_billion = cap_text.trim().parse::<f64>().map_err(|e| {
            EtlError::RowLayout(format!(
                "market cap '{}' for '{}' is not a number: {}",
                cap_text.trim(),
                name,
                e
            ))
        })?;

        Ok(Some(BankRecord {
            name,
            mc_usd_billion,
        }))
    }
}
