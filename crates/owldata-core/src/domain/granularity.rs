use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Time granularity of a period token and of the calendar that backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "m")]
    Month,
    #[serde(rename = "q")]
    Quarter,
    #[serde(rename = "y")]
    Year,
}

impl Granularity {
    pub const ALL: [Self; 4] = [Self::Day, Self::Month, Self::Quarter, Self::Year];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "d",
            Self::Month => "m",
            Self::Quarter => "q",
            Self::Year => "y",
        }
    }

    /// Fixed width of a period token: `yyyymmdd`, `yyyymm`, `yyyyqq`, `yyyy`.
    pub const fn token_len(self) -> usize {
        match self {
            Self::Day => 8,
            Self::Month | Self::Quarter => 6,
            Self::Year => 4,
        }
    }

    /// Name of the period column this granularity governs in result tables.
    pub const fn date_column(self) -> &'static str {
        match self {
            Self::Day => "日期",
            Self::Month => "年月",
            Self::Quarter => "年季",
            Self::Year => "年度",
        }
    }

    /// Catalog key of the reference calendar for this granularity.
    pub const fn calendar_key(self) -> &'static str {
        match self {
            Self::Day => "date_d",
            Self::Month => "date_m",
            Self::Quarter => "date_q",
            Self::Year => "date_y",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        };
        f.write_str(label)
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Ok(Self::Day),
            "m" | "month" => Ok(Self::Month),
            "q" | "quarter" => Ok(Self::Quarter),
            "y" | "year" => Ok(Self::Year),
            other => Err(ValidationError::InvalidGranularity {
                value: other.to_owned(),
            }),
        }
    }
}
