//! Sortable, paginated data tables.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use maison_shared::types::money::{Rounding, format_currency};
use maison_shared::types::{Cents, PageMeta, PageRequest};

use crate::analytics::AnalyticsError;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Plain number.
    Number(Decimal),
    /// Money amount.
    Money(Cents),
    /// Percentage.
    Percent(Decimal),
}

impl Cell {
    fn numeric(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) | Self::Percent(n) => Some(*n),
            Self::Money(c) => Some(Decimal::from(c.get())),
            Self::Text(_) => None,
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().to_lowercase().cmp(&other.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Money(c) => f.write_str(&format_currency(*c, Rounding::Exact)),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<Cents> for Cell {
    fn from(value: Cents) -> Self {
        Self::Money(value)
    }
}

/// Column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable key used in sort requests.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header is clickable.
    pub sortable: bool,
}

impl Column {
    /// A sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }

    /// A column that cannot be sorted.
    #[must_use]
    pub fn fixed(key: &str, label: &str) -> Self {
        Self {
            sortable: false,
            ..Self::new(key, label)
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AnalyticsError::UnknownColumn(format!("sort direction {s}"))),
        }
    }
}

/// Sort and page requested for a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// Column key to sort by; `None` keeps the builder's order.
    pub sort: Option<String>,
    /// Direction used with `sort`.
    pub direction: SortDirection,
    /// Page to keep; `None` keeps every row.
    pub page: Option<PageRequest>,
}

impl TableQuery {
    /// True when the query leaves a table untouched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.sort.is_none() && self.page.is_none()
    }
}

/// A table of rows under fixed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column definitions.
    pub columns: Vec<Column>,
    /// Rows; each should have one cell per column.
    pub rows: Vec<Vec<Cell>>,
    /// Set once the rows were cut down to one page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMeta>,
}

impl DataTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            page: None,
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// True when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorts rows by a column. The sort is stable; a row missing the cell
    /// sorts after every row that has it, in either direction.
    pub fn sort_by(&mut self, key: &str, direction: SortDirection) -> Result<(), AnalyticsError> {
        let index = self
            .columns
            .iter()
            .position(|c| c.key == key && c.sortable)
            .ok_or_else(|| AnalyticsError::UnknownColumn(key.to_string()))?;

        self.rows.sort_by(|a, b| match (a.get(index), b.get(index)) {
            (Some(a), Some(b)) => match direction {
                SortDirection::Asc => a.sort_cmp(b),
                SortDirection::Desc => b.sort_cmp(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(())
    }

    /// Keeps one page of rows and records its position.
    pub fn paginate(&mut self, request: &PageRequest) {
        let (rows, meta) = request.slice(std::mem::take(&mut self.rows));
        self.rows = rows;
        self.page = Some(meta);
    }

    /// Sorts, then paginates, as `query` asks.
    pub fn apply(&mut self, query: &TableQuery) -> Result<(), AnalyticsError> {
        if let Some(key) = &query.sort {
            self.sort_by(key, query.direction)?;
        }
        if let Some(request) = &query.page {
            self.paginate(request);
        }
        Ok(())
    }
}
