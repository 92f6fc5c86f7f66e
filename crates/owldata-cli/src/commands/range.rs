use owldata_core::{validate_range, Granularity, OwlClient, OwlError, PeriodRange};
use serde::Serialize;

use crate::cli::RangeArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RangeResponseData<'a> {
    start: &'a str,
    end: &'a str,
    granularity: Granularity,
    count: usize,
}

/// Validates the range tokens; runs before any network access.
pub fn validate(args: &RangeArgs) -> Result<PeriodRange, CliError> {
    Ok(validate_range(&args.start, &args.end, args.freq).map_err(OwlError::from)?)
}

pub async fn run(range: &PeriodRange, client: &OwlClient) -> Result<CommandResult, CliError> {
    let count = client.count_periods(range).await?;

    let data = serde_json::to_value(RangeResponseData {
        start: &range.start,
        end: &range.end,
        granularity: range.granularity,
        count,
    })?;
    Ok(CommandResult::ok(data))
}
