//! # Owldata Core
//!
//! Client library for the Owl Data Taiwan equities API.
//!
//! ## Overview
//!
//! - **Session setup**: app credentials exchanged for a bearer token, then the
//!   function-to-product catalog loaded once
//! - **Calendar cache** of reference trading calendars, one per granularity
//! - **Range resolution**: `(start, end, granularity)` to a period count
//! - **Normalization**: period parsing, ordering, numeric coercion and column projection
//! - **Query facade** over the 18 call shapes of the API
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Token exchange |
//! | [`calendar`] | Per-granularity calendar cache |
//! | [`catalog`] | Function key to product id lookup |
//! | [`client`] | Session-holding query facade |
//! | [`config`] | Endpoints, timeout and credentials |
//! | [`domain`] | Granularity, stock ids, tables and period tokens |
//! | [`error`] | Error types |
//! | [`fetch`] | Fetch-JSON-to-table primitive |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Result normalization |
//! | [`operation`] | Call shape descriptor table and URL templates |
//! | [`resolver`] | Range validation and counting |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use owldata_core::{OwlClient, Projection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads OWLDATA_APP_ID / OWLDATA_APP_SECRET
//!     let client = OwlClient::connect_from_env().await?;
//!
//!     let prices = client
//!         .ssp("2330", "20190102", "20190131", Projection::columns(["日期", "收盤價"]))
//!         .await?;
//!     println!("{} rows", prices.table.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  OwlClient      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Range Resolver  │────▶│ Calendar Cache   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ fetch_table     │────▶│ HTTP Client      │
//! └────────┬────────┘     │ (reqwest)        │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Normalizer      │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`OwlError`]; [`OwlError::code`] names its category:
//!
//! ```rust
//! use owldata_core::{Granularity, OwlError, RangeError};
//!
//! let error = OwlError::from(RangeError::for_granularity(Granularity::Quarter, "20195"));
//! assert_eq!(error.code(), "SeasonError");
//! ```
//!
//! An empty result is not an error: it comes back as an empty table with a
//! [`DataWarning`] attached.

pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod normalize;
pub mod operation;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use auth::{authenticate, Credential};
pub use calendar::CalendarCache;
pub use catalog::{load_catalog, ProductCatalog};
pub use client::{OwlClient, QueryRequest};
pub use config::{AppCredentials, ClientConfig};
pub use domain::{Cell, Granularity, StockId, Table};
pub use error::{
    AuthError, DataWarning, FetchError, LookupError, NormalizeError, OwlError, RangeError,
    ValidationError,
};
pub use fetch::{fetch_table, parse_table};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use normalize::{normalize, Normalized, NumericCutoff, Projection, ENTITY_COLUMN};
pub use operation::{Operation, OperationSpec, UrlShape, OPERATIONS};
pub use resolver::{count_in_range, validate_range, PeriodRange};
