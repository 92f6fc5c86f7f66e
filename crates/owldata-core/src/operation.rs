//! Descriptor table for the query call shapes.
//!
//! Every public query is one row of [`OPERATIONS`]: the catalog key of its
//! product, how its URL is assembled, and how its result is normalized.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::normalize::NumericCutoff;
use crate::{Granularity, ValidationError};

/// One query call shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ssp,
    Msp,
    FisYear,
    FisQuarter,
    FisMonth,
    FimYear,
    FimQuarter,
    FimMonth,
    Chs,
    Chm,
    Tis,
    Tim,
    Cim,
    Dps,
    Dpm,
    Edps,
    Edpm,
    Tsp,
}

/// How a call shape lays out its request URL after the data base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlShape {
    /// `date/{end}{end_suffix}/{product}/{sid}/{count}` for one stock over a range.
    History {
        granularity: Granularity,
        end_suffix: &'static str,
    },
    /// `date/{date}{date_suffix}/{product}` for every stock on one period.
    CrossSection {
        granularity: Granularity,
        date_suffix: &'static str,
        quarter_shift: bool,
    },
    /// `{product}`: the whole table, no parameters.
    Listing,
    /// `{product}/{sid}`: the latest values for one stock.
    Snapshot,
}

impl UrlShape {
    pub const fn granularity(self) -> Option<Granularity> {
        match self {
            Self::History { granularity, .. } | Self::CrossSection { granularity, .. } => {
                Some(granularity)
            }
            Self::Listing | Self::Snapshot => None,
        }
    }

    pub const fn needs_stock_id(self) -> bool {
        matches!(self, Self::History { .. } | Self::Snapshot)
    }
}

/// Static description of one call shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub name: &'static str,
    pub product_key: &'static str,
    pub shape: UrlShape,
    pub freq: Option<Granularity>,
    pub numeric: NumericCutoff,
    pub description: &'static str,
}

const fn history(granularity: Granularity, end_suffix: &'static str) -> UrlShape {
    UrlShape::History {
        granularity,
        end_suffix,
    }
}

const fn cross_section(granularity: Granularity, date_suffix: &'static str) -> UrlShape {
    UrlShape::CrossSection {
        granularity,
        date_suffix,
        quarter_shift: false,
    }
}

pub static OPERATIONS: [OperationSpec; 18] = [
    OperationSpec {
        operation: Operation::Ssp,
        name: "ssp",
        product_key: "ssp",
        shape: history(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(2),
        description: "daily prices for one stock over a date range",
    },
    OperationSpec {
        operation: Operation::Msp,
        name: "msp",
        product_key: "msp",
        shape: cross_section(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(3),
        description: "prices for every listed stock on one trading day",
    },
    OperationSpec {
        operation: Operation::FisYear,
        name: "fis-y",
        product_key: "sby",
        shape: history(Granularity::Year, "0101"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::From(1),
        description: "annual financial statements for one stock",
    },
    OperationSpec {
        operation: Operation::FisQuarter,
        name: "fis-q",
        product_key: "sbq",
        shape: history(Granularity::Quarter, "01"),
        freq: Some(Granularity::Quarter),
        numeric: NumericCutoff::From(1),
        description: "quarterly financial statements for one stock",
    },
    OperationSpec {
        operation: Operation::FisMonth,
        name: "fis-m",
        product_key: "sbm",
        shape: history(Granularity::Month, "01"),
        freq: Some(Granularity::Month),
        numeric: NumericCutoff::From(1),
        description: "monthly revenue for one stock",
    },
    OperationSpec {
        operation: Operation::FimYear,
        name: "fim-y",
        product_key: "mby",
        shape: cross_section(Granularity::Year, "0101"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::From(3),
        description: "annual financial statements for every stock in one year",
    },
    OperationSpec {
        operation: Operation::FimQuarter,
        name: "fim-q",
        product_key: "mbq",
        shape: UrlShape::CrossSection {
            granularity: Granularity::Quarter,
            date_suffix: "01",
            quarter_shift: true,
        },
        freq: Some(Granularity::Quarter),
        numeric: NumericCutoff::From(3),
        description: "quarterly financial statements for every stock in one quarter",
    },
    OperationSpec {
        operation: Operation::FimMonth,
        name: "fim-m",
        product_key: "mbm",
        shape: cross_section(Granularity::Month, "01"),
        freq: Some(Granularity::Month),
        numeric: NumericCutoff::From(3),
        description: "monthly revenue for every stock in one month",
    },
    OperationSpec {
        operation: Operation::Chs,
        name: "chs",
        product_key: "sch",
        shape: history(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(1),
        description: "institutional investor trading for one stock over a date range",
    },
    OperationSpec {
        operation: Operation::Chm,
        name: "chm",
        product_key: "mch",
        shape: cross_section(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(3),
        description: "institutional investor trading for every stock on one day",
    },
    OperationSpec {
        operation: Operation::Tis,
        name: "tis",
        product_key: "sth",
        shape: history(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(1),
        description: "technical indicators for one stock over a date range",
    },
    OperationSpec {
        operation: Operation::Tim,
        name: "tim",
        product_key: "mth",
        shape: cross_section(Granularity::Day, ""),
        freq: Some(Granularity::Day),
        numeric: NumericCutoff::From(3),
        description: "technical indicators for every stock on one day",
    },
    OperationSpec {
        operation: Operation::Cim,
        name: "cim",
        product_key: "mcm",
        shape: UrlShape::Listing,
        freq: None,
        numeric: NumericCutoff::FromEnd(1),
        description: "basic company information for every listed stock",
    },
    OperationSpec {
        operation: Operation::Dps,
        name: "dps",
        product_key: "scm1",
        shape: history(Granularity::Year, "0101"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::From(3),
        description: "dividend policy for one stock over a year range",
    },
    OperationSpec {
        operation: Operation::Dpm,
        name: "dpm",
        product_key: "mcm1",
        shape: cross_section(Granularity::Year, "1231"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::From(5),
        description: "dividend policy for every stock in one year",
    },
    OperationSpec {
        operation: Operation::Edps,
        name: "edps",
        product_key: "scm2",
        shape: history(Granularity::Year, "0101"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::None,
        description: "ex-dividend schedule for one stock over a year range",
    },
    OperationSpec {
        operation: Operation::Edpm,
        name: "edpm",
        product_key: "mcm2",
        shape: cross_section(Granularity::Year, "0101"),
        freq: Some(Granularity::Year),
        numeric: NumericCutoff::None,
        description: "ex-dividend schedule for every stock in one year",
    },
    OperationSpec {
        operation: Operation::Tsp,
        name: "tsp",
        product_key: "mnp",
        shape: UrlShape::Snapshot,
        freq: None,
        numeric: NumericCutoff::From(3),
        description: "latest real-time quote for one stock",
    },
];

impl Operation {
    pub const ALL: [Self; 18] = [
        Self::Ssp,
        Self::Msp,
        Self::FisYear,
        Self::FisQuarter,
        Self::FisMonth,
        Self::FimYear,
        Self::FimQuarter,
        Self::FimMonth,
        Self::Chs,
        Self::Chm,
        Self::Tis,
        Self::Tim,
        Self::Cim,
        Self::Dps,
        Self::Dpm,
        Self::Edps,
        Self::Edpm,
        Self::Tsp,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        &OPERATIONS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Single-stock financial statements at `granularity`; days have none.
    pub const fn financials(granularity: Granularity) -> Option<Self> {
        match granularity {
            Granularity::Year => Some(Self::FisYear),
            Granularity::Quarter => Some(Self::FisQuarter),
            Granularity::Month => Some(Self::FisMonth),
            Granularity::Day => None,
        }
    }

    /// All-stock financial statements at `granularity`; days have none.
    pub const fn cross_section_financials(granularity: Granularity) -> Option<Self> {
        match granularity {
            Granularity::Year => Some(Self::FimYear),
            Granularity::Quarter => Some(Self::FimQuarter),
            Granularity::Month => Some(Self::FimMonth),
            Granularity::Day => None,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidOperation {
                value: value.to_owned(),
            })
    }
}

/// Rewrites a `yyyyqq` quarter token into the `yyyymm` month the backend
/// files that quarter's cross-section under.
///
/// Q1 stays, Q2 +2, Q3 +4, Q4 +6; any other `qq` is returned unchanged.
pub fn quarter_month_token(token: &str) -> String {
    let shift = match token.get(4..6) {
        Some("01") => 0,
        Some("02") => 2,
        Some("03") => 4,
        Some("04") => 6,
        _ => return token.to_owned(),
    };
    match token.parse::<u64>() {
        Ok(value) => (value + shift).to_string(),
        Err(_) => token.to_owned(),
    }
}

/// Values substituted into a URL template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams<'a> {
    /// End token for histories, period token for cross-sections.
    pub date: Option<&'a str>,
    pub sid: Option<&'a str>,
    pub count: Option<usize>,
}

/// Assembles the request URL for `shape`.
///
/// `base` must end with `/`. Absent parameters render as empty segments;
/// callers validate presence before building.
pub fn build_url(base: &str, shape: UrlShape, product_id: &str, params: &UrlParams<'_>) -> String {
    let date = params.date.unwrap_or_default();
    let sid = params.sid.unwrap_or_default();
    match shape {
        UrlShape::History { end_suffix, .. } => {
            let count = params.count.unwrap_or_default();
            format!("{base}date/{date}{end_suffix}/{product_id}/{sid}/{count}")
        }
        UrlShape::CrossSection {
            date_suffix,
            quarter_shift,
            ..
        } => {
            let date = if quarter_shift {
                quarter_month_token(date)
            } else {
                date.to_owned()
            };
            format!("{base}date/{date}{date_suffix}/{product_id}")
        }
        UrlShape::Listing => format!("{base}{product_id}"),
        UrlShape::Snapshot => format!("{base}{product_id}/{sid}"),
    }
}
