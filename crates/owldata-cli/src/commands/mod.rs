mod operations;
mod query;
mod range;

use owldata_core::OwlClient;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    debug!(command = ?cli.command, "running command");
    match &cli.command {
        Command::Operations => operations::run(),
        Command::Query(args) => {
            let request = query::build_request(args)?;
            let client = OwlClient::connect_from_env().await?;
            query::run(args.operation, &request, &client).await
        }
        Command::Range(args) => {
            let range = range::validate(args)?;
            let client = OwlClient::connect_from_env().await?;
            range::run(&range, &client).await
        }
    }
}
