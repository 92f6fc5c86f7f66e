use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use serde_json::Value;
use time::Date;

use crate::ValidationError;

/// A single table cell as delivered by the backend or after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty string; kept distinct from null because the backend uses it for "no value yet".
    Empty,
    Text(String),
    /// Coerced numeric value; missing values coerce to `NaN`.
    Number(f64),
    /// Parsed period, always the last day of the period.
    Date(Date),
    Null,
}

impl Cell {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(text) if text.is_empty() => Self::Empty,
            Value::String(text) => Self::Text(text),
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::Bool(flag) => Self::Text(flag.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// True for cells carrying no value at all (empty string, null, NaN).
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty | Self::Null => true,
            Self::Number(value) => value.is_nan(),
            Self::Text(_) | Self::Date(_) => false,
        }
    }

    /// Raw token form of the cell, used for keys and period tokens.
    pub fn to_token(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.trim().to_owned()),
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => {
                Some(format!("{value:.0}"))
            }
            Self::Number(value) if value.is_finite() => Some(value.to_string()),
            Self::Date(date) => Some(crate::domain::period::day_token(*date)),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty | Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(value) if value.is_nan() => f.write_str("NaN"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Date(date) => write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(value) if value.is_finite() => serializer.serialize_f64(*value),
            Self::Number(_) | Self::Null => serializer.serialize_none(),
            Self::Date(_) => serializer.collect_str(self),
        }
    }
}

/// Column-titled rows, in the order they should be presented.
///
/// Row positions are the table index: they always run densely from 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, ValidationError> {
        let expected = columns.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(ValidationError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from the backend's `Title` and `Data` arrays.
    pub fn from_json_rows(
        columns: Vec<String>,
        data: Vec<Vec<Value>>,
    ) -> Result<Self, ValidationError> {
        let rows = data
            .into_iter()
            .map(|row| row.into_iter().map(Cell::from_json).collect())
            .collect();
        Self::new(columns, rows)
    }

    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|cells| &cells[index]).collect())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    /// Restricts the table to `names`, in that order.
    ///
    /// Returns the names that do not exist when any are missing.
    pub fn select(&self, names: &[String]) -> Result<Table, Vec<String>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(index) => indices.push(index),
                None => missing.push(name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        let rows = self
            .rows
            .iter()
            .map(|cells| indices.iter().map(|&index| cells[index].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.to_vec(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_json_rows(
            vec![String::from("日期"), String::from("收盤價")],
            vec![
                vec![json!("20190102"), json!("36.2")],
                vec![json!(""), json!(null)],
            ],
        )
        .expect("valid table")
    }

    #[test]
    fn json_cells_keep_empty_and_null_apart() {
        let table = sample();
        assert_eq!(table.cell(1, "日期"), Some(&Cell::Empty));
        assert_eq!(table.cell(1, "收盤價"), Some(&Cell::Null));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::from_json_rows(vec![String::from("a")], vec![vec![json!(1), json!(2)]])
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::RaggedRow {
                row: 0,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn select_reorders_and_reports_missing_columns() {
        let table = sample();
        let selected = table
            .select(&[String::from("收盤價"), String::from("日期")])
            .expect("columns exist");
        assert_eq!(selected.columns(), ["收盤價", "日期"]);
        assert_eq!(selected.rows()[0][1], Cell::Text(String::from("20190102")));

        let missing = table
            .select(&[String::from("日期"), String::from("成交量")])
            .expect_err("must fail");
        assert_eq!(missing, vec![String::from("成交量")]);
    }

    #[test]
    fn number_tokens_drop_integral_fraction() {
        assert_eq!(Cell::Number(20190102.0).to_token().as_deref(), Some("20190102"));
    }
}
