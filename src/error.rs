//! Error types for the NHL stats query engine

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Stats API returned no data")]
    NoData,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid field path '{path}': empty segment")]
    InvalidFieldPath { path: String },

    #[error(
        "Invalid view '{view}'. Field '{segment}' not found. Valid fields at this level include: {}",
        .available.join(", ")
    )]
    InvalidViewPath {
        view: String,
        segment: String,
        available: Vec<String>,
    },

    #[error("No selection mode: provide a season, a start/end season pair, or a start/end date pair")]
    MissingSelectionMode,

    #[error("Invalid date format '{value}', expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    #[error("Invalid season '{value}', expected digits only such as 20232024")]
    InvalidSeason { value: String },

    #[error("Invalid fact property '{property}', expected letters, digits or '_'")]
    InvalidFactProperty { property: String },

    #[error("Invalid fact value '{value}', expected a number")]
    InvalidFactValue { value: String },

    #[error("Sort fields ({fields}) and directions ({directions}) must have the same length")]
    MismatchedSortArity { fields: usize, directions: usize },

    #[error("Invalid sort direction: {direction}. Must be 'ASC' or 'DESC'")]
    InvalidSortDirection { direction: String },

    #[error(
        "Fact properties ({properties}), comparators ({comparators}) and values ({values}) must have the same length"
    )]
    MismatchedFactArity {
        properties: usize,
        comparators: usize,
        values: usize,
    },

    #[error("Invalid comparator: {comparator}")]
    InvalidComparator { comparator: String },

    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy { reason: String },

    #[error("Unknown report key '{key}', expected skater, goalie or team")]
    InvalidReportKey { key: String },

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Invalid filter criterion for '{field}': {reason}")]
    InvalidCriterion { field: String, reason: String },
}

impl StatsError {
    /// Validation errors are raised before any network call and are never retried.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            StatsError::Http(_) | StatsError::Decode(_) | StatsError::NoData
        )
    }
}
