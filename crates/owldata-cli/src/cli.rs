//! CLI argument definitions for owldata.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `query` | Run one of the API call shapes |
//! | `range` | Count calendar periods between two tokens |
//! | `operations` | List the available call shapes |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! Credentials come from `OWLDATA_APP_ID` and `OWLDATA_APP_SECRET`.
//!
//! # Examples
//!
//! ```bash
//! owldata query ssp --sid 2330 --start 20190102 --end 20190131 --columns 日期,收盤價
//! owldata query fim-q --date 201902 --format table
//! owldata range 201901 201904 --freq q
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use owldata_core::{Granularity, Operation};

/// Owl Data Taiwan equities API client.
#[derive(Debug, Parser)]
#[command(name = "owldata", author, version, about = "Owl Data Taiwan equities API client")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Aligned text table for terminal display.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a query such as `ssp`, `fim-q` or `cim`.
    Query(QueryArgs),
    /// Count calendar periods in an inclusive range.
    Range(RangeArgs),
    /// List every call shape with its product key and parameters.
    Operations,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Call shape name (see `owldata operations`).
    pub operation: Operation,

    /// Stock id for single-stock queries.
    #[arg(long)]
    pub sid: Option<String>,

    /// First period of a range query.
    #[arg(long)]
    pub start: Option<String>,

    /// Last period of a range query.
    #[arg(long)]
    pub end: Option<String>,

    /// Period of an all-stock query.
    #[arg(long)]
    pub date: Option<String>,

    /// Comma separated output columns, in output order.
    #[arg(long)]
    pub columns: Option<String>,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    pub start: String,
    pub end: String,

    /// Granularity: d, m, q or y.
    #[arg(long, default_value = "d")]
    pub freq: Granularity,
}
