use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::common::error::{EtlError, Result};
use crate::common::types::BankRecord;
use crate::pipeline::ingestion::row_parser::{selector, ArchivedWikipediaRowParser, RowParser};

/// Status and body of a fetched page
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Where the HTML comes from
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<PageResponse>;
}

pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    /// `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str) -> Result<PageResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!("Fetched {} bytes with status {}", body.len(), status);
        Ok(PageResponse { status, body })
    }
}

pub struct Extractor {
    url: String,
    source: Box<dyn PageSource>,
    parser: Box<dyn RowParser>,
}

impl Extractor {
    pub fn new(url: impl Into<String>, source: Box<dyn PageSource>, parser: Box<dyn RowParser>) -> Self {
        Self {
            url: url.into(),
            source,
            parser,
        }
    }

    /// Extractor for the archived Wikipedia layout over plain HTTP.
    pub fn archived_wikipedia(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self::new(
            url,
            Box::new(HttpPageSource::new(timeout)?),
            Box::new(ArchivedWikipediaRowParser::new()?),
        ))
    }

    /// Fetch the page and read its first table body.
    ///
    /// A response other than 200 yields an empty result; transport failures are errors.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn extract(&self) -> Result<Vec<BankRecord>> {
        let response = self.source.fetch(&self.url)?;
        if response.status != 200 {
            warn!("Source responded with status {}, no records extracted", response.status);
            return Ok(Vec::new());
        }

        let records = parse_banks_table(&response.body, self.parser.as_ref())?;
        info!("Extracted {} bank records", records.len());
        Ok(records)
    }
}

/// Apply `parser` to every row of the document's first `<tbody>`.
pub fn parse_banks_table(html: &str, parser: &dyn RowParser) -> Result<Vec<BankRecord>> {
    let document = Html::parse_document(html);
    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| EtlError::RowLayout("no table body found in page".into()))?;

    let mut records = Vec::new();
    for row in tbody.select(&row_selector) {
        if let Some(record) = parser.parse_row(row)? {
            records.push(record);
        }
    }
    Ok(records)
}
