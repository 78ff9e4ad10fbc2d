use std::process::ExitCode;

use fxconv_core::CacheMode;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{self, Report};

use super::Session;

pub async fn run(session: &Session, cli: &Cli) -> Result<ExitCode, CliError> {
    let currencies = session
        .client
        .available_currencies(CacheMode::Use)
        .await?
        .to_vec();

    output::render(
        &Report::Currencies {
            currencies: &currencies,
        },
        cli.format,
        cli.pretty,
    )?;
    Ok(ExitCode::SUCCESS)
}
