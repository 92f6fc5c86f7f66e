//! Reshaping of fetched tables: period parsing, ordering, numeric coercion
//! and column projection.

use std::cmp::Ordering;
use std::ops::Range;

use serde::Serialize;
use tracing::warn;

use crate::domain::period::period_end;
use crate::{Cell, DataWarning, Granularity, NormalizeError, Table};

/// Column that marks a table as holding rows for many entities.
pub const ENTITY_COLUMN: &str = "股票代號";

/// Which columns are coerced to numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericCutoff {
    None,
    /// Every column from this index onward.
    From(usize),
    /// The last `n` columns.
    FromEnd(usize),
}

impl NumericCutoff {
    fn columns(self, width: usize) -> Range<usize> {
        match self {
            Self::None => 0..0,
            Self::From(start) => start.min(width)..width,
            Self::FromEnd(count) => width.saturating_sub(count)..width,
        }
    }
}

/// Requested output columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Keep every column.
    #[default]
    Unspecified,
    /// Exactly these columns, in this order. Must not be empty.
    Explicit(Vec<String>),
}

impl Projection {
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Explicit(names.into_iter().map(Into::into).collect())
    }

    /// Parses a comma separated list; blank entries are dropped.
    pub fn parse_list(raw: &str) -> Self {
        Self::columns(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn validate(&self) -> Result<(), NormalizeError> {
        match self {
            Self::Explicit(names) if names.is_empty() => Err(NormalizeError::EmptyProjection),
            _ => Ok(()),
        }
    }
}

/// A normalized table plus any warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    pub table: Table,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "warning_codes")]
    pub warnings: Vec<DataWarning>,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn warning_codes<S>(warnings: &[DataWarning], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(warnings.iter().map(|warning| {
        serde_json::json!({ "code": warning.code(), "message": warning.to_string() })
    }))
}

/// Normalizes a fetched table.
///
/// An empty table is returned untouched with a [`DataWarning::Sid`].
pub fn normalize(
    mut table: Table,
    freq: Option<Granularity>,
    numeric: NumericCutoff,
    projection: &Projection,
    product_id: &str,
) -> Result<Normalized, NormalizeError> {
    projection.validate()?;

    if table.is_empty() {
        let warning = DataWarning::Sid {
            product_id: product_id.to_owned(),
        };
        warn!(product_id, code = warning.code(), "no rows returned");
        return Ok(Normalized {
            table,
            warnings: vec![warning],
        });
    }

    if let Some(granularity) = freq {
        let index = parse_period_column(&mut table, granularity)?;
        if !table.has_column(ENTITY_COLUMN) {
            sort_by_period(&mut table, index);
        }
    }

    coerce_numeric(&mut table, numeric)?;

    let table = match projection {
        Projection::Unspecified => table,
        Projection::Explicit(names) => table
            .select(names)
            .map_err(|missing| NormalizeError::Columns { missing })?,
    };

    Ok(Normalized {
        table,
        warnings: Vec::new(),
    })
}

fn parse_period_column(table: &mut Table, granularity: Granularity) -> Result<usize, NormalizeError> {
    let column = granularity.date_column();
    let index = table
        .column_index(column)
        .ok_or_else(|| NormalizeError::Columns {
            missing: vec![column.to_owned()],
        })?;

    for cells in table.rows_mut() {
        let cell = &mut cells[index];
        if cell.is_missing() || cell.as_date().is_some() {
            continue;
        }
        let parsed = cell
            .to_token()
            .and_then(|token| period_end(&token, granularity))
            .ok_or_else(|| NormalizeError::Period {
                column: column.to_owned(),
                value: cell.to_string(),
                granularity,
            })?;
        *cell = Cell::Date(parsed);
    }

    Ok(index)
}

fn sort_by_period(table: &mut Table, index: usize) {
    table
        .rows_mut()
        .sort_by(|left, right| match (left[index].as_date(), right[index].as_date()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
}

fn coerce_numeric(table: &mut Table, numeric: NumericCutoff) -> Result<(), NormalizeError> {
    let range = numeric.columns(table.width());
    if range.is_empty() {
        return Ok(());
    }

    let columns = table.columns()[range.clone()].to_vec();
    for cells in table.rows_mut() {
        for (offset, cell) in cells[range.clone()].iter_mut().enumerate() {
            coerce_cell(cell, &columns[offset])?;
        }
    }
    Ok(())
}

fn coerce_cell(cell: &mut Cell, column: &str) -> Result<(), NormalizeError> {
    match cell {
        Cell::Empty | Cell::Null => *cell = Cell::Number(f64::NAN),
        Cell::Number(_) | Cell::Date(_) => {}
        Cell::Text(text) => {
            let value = text
                .trim()
                .parse::<f64>()
                .map_err(|_| NormalizeError::Value {
                    column: column.to_owned(),
                    value: text.clone(),
                })?;
            *cell = Cell::Number(value);
        }
    }
    Ok(())
}
