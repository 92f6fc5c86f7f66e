use owldata_core::{Granularity, NumericCutoff, UrlShape, OPERATIONS};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct OperationRow {
    name: &'static str,
    product_key: &'static str,
    parameters: &'static str,
    granularity: Option<Granularity>,
    numeric_from: String,
    description: &'static str,
}

pub fn run() -> Result<CommandResult, CliError> {
    let columns = [
        "name",
        "product_key",
        "parameters",
        "granularity",
        "numeric_from",
        "description",
    ];
    let rows = OPERATIONS
        .iter()
        .map(|spec| OperationRow {
            name: spec.name,
            product_key: spec.product_key,
            parameters: parameters(spec.shape),
            granularity: spec.shape.granularity(),
            numeric_from: match spec.numeric {
                NumericCutoff::None => String::from("-"),
                NumericCutoff::From(index) => index.to_string(),
                NumericCutoff::FromEnd(count) => format!("last {count}"),
            },
            description: spec.description,
        })
        .map(|row| {
            serde_json::to_value(&row).map(|value| {
                columns
                    .iter()
                    .map(|column| value[*column].clone())
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let data = serde_json::json!({ "columns": columns, "rows": rows });
    Ok(CommandResult::ok(data))
}

const fn parameters(shape: UrlShape) -> &'static str {
    match shape {
        UrlShape::History { .. } => "--sid --start --end",
        UrlShape::CrossSection { .. } => "--date",
        UrlShape::Listing => "",
        UrlShape::Snapshot => "--sid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_operation() {
        let result = run().expect("static table renders");
        let rows = result.data["rows"].as_array().expect("rows array");
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0][0], "ssp");
        assert_eq!(rows[6][1], "mbq");
    }
}
