use std::fmt;

use thiserror::Error;

/// Which filter a rejected value was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Status,
    Gender,
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterField::Status => write!(f, "status"),
            FilterField::Gender => write!(f, "gender"),
        }
    }
}

/// Input rejected by the core. State is left untouched when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid {field} filter value {value:?}")]
    InvalidFilterValue { field: FilterField, value: String },
    #[error("page {requested} is out of range (total pages: {})", format_total(.total_pages))]
    OutOfRange {
        requested: u32,
        total_pages: Option<u32>,
    },
}

fn format_total(total_pages: &Option<u32>) -> String {
    total_pages.map_or_else(|| "unknown".to_string(), |total| total.to_string())
}

/// Why a fetch ended without a result page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("network failure: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("response too large")]
    TooLarge,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
