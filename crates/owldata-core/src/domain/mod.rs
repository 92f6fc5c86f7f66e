//! # Domain Models
//!
//! Strongly-typed building blocks shared by every query.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Granularity`] | Day / month / quarter / year period kind |
//! | [`StockId`] | Validated Taiwan listing code |
//! | [`Table`] | Column-titled rows returned by the API |
//! | [`Cell`] | One table value (text, number, date, empty, null) |
//!
//! Period tokens (`yyyymmdd`, `yyyymm`, `yyyyqq`, `yyyy`) are handled by the
//! [`period`] helpers.

mod granularity;
pub mod period;
mod stock_id;
mod table;

pub use granularity::Granularity;
pub use stock_id::StockId;
pub use table::{Cell, Table};
