// src/extractors/table.rs

// --- Imports ---
use crate::extractors::decode::decode_document;
use crate::extractors::models::{Record, ResultSet};
use crate::fetch::{FetchedPage, PageClient};
use crate::utils::error::{AppError, ExtractError};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

// --- Constants ---
/// The GDP table is the third `<table>` on the page.
pub const DEFAULT_TABLE_INDEX: usize = 2;
pub const DEFAULT_MAX_RECORDS: usize = 5;
pub const DEFAULT_COUNTRY_CELL: usize = 1;
pub const DEFAULT_GDP_CELL: usize = 3;

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("Failed to compile TABLE_SELECTOR"));

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

// Only `td` counts as a data cell; header rows made of `th` have zero cells.
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile CELL_SELECTOR"));

// --- Regex Patterns for Cell Cleanup (Lazy Static) ---
// Footnote references such as "[1]" or "[n 2]".
static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("Failed to compile FOOTNOTE_RE"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

// --- Data Structures ---

/// What to do with a data row that is too short for the fixed cell positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortRowPolicy {
    /// Abort the extraction with [`ExtractError::CellIndex`].
    #[default]
    Fail,
    /// Log and skip the row; it does not count toward the record limit.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub table_index: usize,
    pub max_records: usize,
    pub country_cell: usize,
    pub gdp_cell: usize,
    pub short_rows: ShortRowPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            table_index: DEFAULT_TABLE_INDEX,
            max_records: DEFAULT_MAX_RECORDS,
            country_cell: DEFAULT_COUNTRY_CELL,
            gdp_cell: DEFAULT_GDP_CELL,
            short_rows: ShortRowPolicy::Fail,
        }
    }
}

// --- Main Extractor Structure ---

/// Fetches a page and pulls the leading rows of one positional table.
pub struct TableExtractor {
    client: PageClient,
    options: ExtractOptions,
}

impl TableExtractor {
    pub fn new(client: PageClient, options: ExtractOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Downloads `url` and extracts its records. One request per call.
    pub async fn extract(&self, url: &str) -> Result<ResultSet, AppError> {
        let page = self.client.fetch(url).await?;
        tracing::info!("Successfully downloaded document ({} bytes)", page.body.len());
        Ok(self.extract_from_page(&page)?)
    }

    /// Decodes a fetched page using its declared charset and extracts from it.
    pub fn extract_from_page(&self, page: &FetchedPage) -> Result<ResultSet, ExtractError> {
        let html = decode_document(&page.body, page.charset.as_deref())?;
        self.extract_from_html(&html)
    }

    /// Decodes a raw body (BOM, `<meta>` charset, else UTF-8) and extracts from it.
    pub fn extract_from_bytes(&self, body: &[u8]) -> Result<ResultSet, ExtractError> {
        let html = decode_document(body, None)?;
        self.extract_from_html(&html)
    }

    pub fn extract_from_html(&self, html: &str) -> Result<ResultSet, ExtractError> {
        extract_records(html, &self.options)
    }
}

/// Parses `html` and converts the selected table's leading data rows into records.
///
/// Rows are walked in document order. The first row without any `td` cell
/// ends the walk, as does reaching `max_records`.
pub fn extract_records(html: &str, options: &ExtractOptions) -> Result<ResultSet, ExtractError> {
    // 1. Parse the HTML document (html5ever recovers from malformed markup)
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!(
            "HTML parser recovered from {} issue(s); first: {}",
            document.errors.len(),
            document.errors[0]
        );
    }

    // 2. Locate the table by position
    let table = select_table(&document, options.table_index)?;

    // 3. Walk the rows
    let mut results = ResultSet::with_capacity(options.max_records);
    for (row_index, row) in table.select(&ROW_SELECTOR).enumerate() {
        if results.len() >= options.max_records {
            break;
        }

        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cells.is_empty() {
            tracing::debug!("Row {} has no data cells, treating it as end of data", row_index);
            break;
        }

        match build_record(row_index, &cells, options) {
            Ok(record) => {
                tracing::trace!("Row {}: {:?}", row_index, record);
                results.push(record);
            }
            Err(ExtractError::CellIndex { cells, required, .. })
                if options.short_rows == ShortRowPolicy::Skip =>
            {
                tracing::warn!(
                    "Skipping row {}: {} data cells, need index {}",
                    row_index,
                    cells,
                    required
                );
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Extracted {} record(s) from table {}", results.len(), options.table_index);
    Ok(results)
}

fn select_table(document: &Html, index: usize) -> Result<ElementRef<'_>, ExtractError> {
    if let Some(table) = document.select(&TABLE_SELECTOR).nth(index) {
        return Ok(table);
    }

    let found = document.select(&TABLE_SELECTOR).count();
    tracing::error!("Expected a table at index {}, document has {}", index, found);
    Err(ExtractError::TableNotFound { index, found })
}

fn build_record(
    row_index: usize,
    cells: &[ElementRef],
    options: &ExtractOptions,
) -> Result<Record, ExtractError> {
    let cell = |index: usize| {
        cells.get(index).map(|c| cell_text(*c)).ok_or(ExtractError::CellIndex {
            row: row_index,
            cells: cells.len(),
            required: index,
        })
    };

    let country = cell(options.country_cell)?;
    let gdp_usd = cell(options.gdp_cell)?;
    Ok(Record::new(country, gdp_usd))
}

/// Visible text of a cell with footnote markers dropped and whitespace collapsed.
fn cell_text(cell: ElementRef) -> String {
    let raw = cell.text().collect::<String>().replace('\u{a0}', " ");
    let without_notes = FOOTNOTE_RE.replace_all(&raw, "");
    WHITESPACE_RE.replace_all(without_notes.trim(), " ").into_owned()
}
