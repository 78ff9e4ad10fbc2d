use std::process::ExitCode;

use fxconv_core::{CacheMode, CurrencyCode, NormalizedRate};

use crate::cli::{Cli, RatesArgs};
use crate::error::CliError;
use crate::output::{self, Report};

use super::Session;

pub async fn run(args: &RatesArgs, session: &Session, cli: &Cli) -> Result<ExitCode, CliError> {
    let base = CurrencyCode::parse(&args.base)?;
    let rates: Vec<NormalizedRate> = session
        .client
        .currency_rates(base.as_str(), CacheMode::Use)
        .await?
        .into_iter()
        .filter(|rate| rate.is_complete() && rate.currency == base.as_str())
        .collect();

    output::render(
        &Report::Rates {
            base_currency: base.as_str(),
            rates: &rates,
        },
        cli.format,
        cli.pretty,
    )?;
    Ok(ExitCode::SUCCESS)
}
