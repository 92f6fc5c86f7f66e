use thiserror::Error;

use crate::Granularity;

/// Input validation errors raised before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid granularity '{value}', expected one of d, m, q, y")]
    InvalidGranularity { value: String },
    #[error("unknown operation '{value}'")]
    InvalidOperation { value: String },

    #[error("stock id cannot be empty")]
    EmptyStockId,
    #[error("stock id length {len} exceeds max {max}")]
    StockIdTooLong { len: usize, max: usize },
    #[error("stock id contains invalid character '{ch}' at index {index}")]
    StockIdInvalidChar { ch: char, index: usize },

    #[error("operation '{operation}' requires {field}")]
    MissingArgument {
        operation: &'static str,
        field: &'static str,
    },

    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("app id and app secret must both be set (OWLDATA_APP_ID / OWLDATA_APP_SECRET)")]
    MissingCredentials,
    #[error("invalid configuration value for {key}: '{value}'")]
    InvalidConfig { key: &'static str, value: String },
}

/// Malformed period tokens or ranges.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("start '{start}' is later than end '{end}'")]
    Order { start: String, end: String },
    #[error("day token '{token}' must be a valid yyyymmdd date")]
    Day { token: String },
    #[error("month token '{token}' must be a valid yyyymm month")]
    Month { token: String },
    #[error("quarter token '{token}' must be yyyyqq with qq in 01-04")]
    Quarter { token: String },
    #[error("year token '{token}' must be a valid yyyy year")]
    Year { token: String },
}

impl RangeError {
    pub fn for_granularity(granularity: Granularity, token: &str) -> Self {
        let token = token.to_owned();
        match granularity {
            Granularity::Day => Self::Day { token },
            Granularity::Month => Self::Month { token },
            Granularity::Quarter => Self::Quarter { token },
            Granularity::Year => Self::Year { token },
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Order { .. } => "DateError",
            Self::Day { .. } => "DayError",
            Self::Month { .. } => "MonthError",
            Self::Quarter { .. } => "SeasonError",
            Self::Year { .. } => "YearError",
        }
    }
}

/// Failures while reshaping a fetched table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("column '{column}' holds non-numeric value '{value}'")]
    Value { column: String, value: String },
    #[error("column '{column}' holds value '{value}' that is not a valid {granularity} period")]
    Period {
        column: String,
        value: String,
        granularity: Granularity,
    },
    #[error("unknown columns: {}", missing.join(", "))]
    Columns { missing: Vec<String> },
    #[error("column projection must name at least one column")]
    EmptyProjection,
}

impl NormalizeError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Value { .. } | Self::Period { .. } => "ValueError",
            Self::Columns { .. } | Self::EmptyProjection => "ColumnsError",
        }
    }
}

/// Data endpoint failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: &'static str },
    #[error("upstream returned unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode table payload: {0}")]
    Decode(String),
}

/// Token exchange failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: &'static str },
    #[error("authentication failed with unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("authentication transport error: {0}")]
    Transport(String),
    #[error("authentication response did not contain a token")]
    MissingToken,
}

/// Catalog lookups for keys the session does not know.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no product id registered for function '{key}'")]
    UnknownProduct { key: String },
}

/// Recoverable conditions attached to an otherwise successful result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataWarning {
    #[error("no rows returned for product '{product_id}'")]
    Sid { product_id: String },
}

impl DataWarning {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Sid { .. } => "SidError",
        }
    }
}

/// Top-level error type for client operations.
#[derive(Debug, Error)]
pub enum OwlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl OwlError {
    /// Stable error code, one per failure category.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Auth(_) => "AuthError",
            Self::Fetch(_) => "FetchError",
            Self::Range(error) => error.code(),
            Self::Normalize(error) => error.code(),
            Self::Lookup(_) => "LookupError",
        }
    }
}
