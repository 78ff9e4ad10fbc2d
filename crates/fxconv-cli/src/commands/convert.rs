use std::process::ExitCode;

use fxconv_core::input::validate_amount;
use fxconv_core::{ConversionViewModel, CurrencyCode, InputConfig};

use crate::cli::{Cli, ConvertArgs};
use crate::error::CliError;
use crate::output::{self, Report};

use super::Session;

pub async fn run(args: &ConvertArgs, session: &Session, cli: &Cli) -> Result<ExitCode, CliError> {
    let base = CurrencyCode::parse(&args.base)?;
    let (amount, warning) = validate_amount(args.amount.trim(), InputConfig::default().max_value)?;
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }

    let mut view_model = ConversionViewModel::new(session.client.clone()).with_base_currency(base);
    view_model.set_amount(amount);
    view_model.load().await;

    let view = view_model.snapshot();
    output::render(&Report::converter(&view, session.theme), cli.format, cli.pretty)?;

    if view.error.is_some() {
        return Ok(ExitCode::from(3));
    }
    Ok(ExitCode::SUCCESS)
}
