// src/extractors/models.rs
use serde::Serialize;
use std::fmt;

/// One extracted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "GDP_USD")]
    pub gdp_usd: String,
}

impl Record {
    pub fn new(country: impl Into<String>, gdp_usd: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            gdp_usd: gdp_usd.into(),
        }
    }
}

/// Ordered, bounded collection of records in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub const COLUMNS: [&'static str; 2] = ["Country", "GDP_USD"];

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Pretty JSON array of `{"Country": .., "GDP_USD": ..}` objects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

/// Indexed text table: row number, left-aligned country, right-aligned GDP.
impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [country_col, gdp_col] = Self::COLUMNS;

        let records = self.records();
        if records.is_empty() {
            return write!(f, "Empty result set\nColumns: [{}, {}]", country_col, gdp_col);
        }

        let index_width = (records.len() - 1).to_string().len();
        let country_width = records
            .iter()
            .map(|r| r.country.chars().count())
            .chain(std::iter::once(country_col.len()))
            .max()
            .unwrap_or(0);
        let gdp_width = records
            .iter()
            .map(|r| r.gdp_usd.chars().count())
            .chain(std::iter::once(gdp_col.len()))
            .max()
            .unwrap_or(0);

        write!(
            f,
            "{:iw$}  {:<cw$}  {:>gw$}",
            "",
            country_col,
            gdp_col,
            iw = index_width,
            cw = country_width,
            gw = gdp_width
        )?;
        for (i, record) in records.iter().enumerate() {
            write!(
                f,
                "\n{:<iw$}  {:<cw$}  {:>gw$}",
                i,
                record.country,
                record.gdp_usd,
                iw = index_width,
                cw = country_width,
                gw = gdp_width
            )?;
        }
        Ok(())
    }
}
