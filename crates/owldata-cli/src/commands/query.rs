use owldata_core::{Operation, OwlClient, Projection, QueryRequest, StockId};

use crate::cli::QueryArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(
    operation: Operation,
    request: &QueryRequest,
    client: &OwlClient,
) -> Result<CommandResult, CliError> {
    let normalized = client.execute(operation, request).await?;
    let warnings = normalized
        .warnings
        .iter()
        .map(|warning| format!("{}: {warning}", warning.code()))
        .collect();

    Ok(CommandResult::ok(serde_json::to_value(&normalized.table)?).with_warnings(warnings))
}

/// Parses the user-supplied parts of a query; runs before any network access.
pub fn build_request(args: &QueryArgs) -> Result<QueryRequest, CliError> {
    let sid = args.sid.as_deref().map(StockId::parse).transpose()?;
    let projection = args
        .columns
        .as_deref()
        .map_or(Projection::Unspecified, Projection::parse_list);

    Ok(QueryRequest {
        sid,
        start: args.start.clone(),
        end: args.end.clone(),
        date: args.date.clone(),
        projection,
    })
}
