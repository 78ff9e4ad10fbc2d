use std::process::ExitCode;

use crate::cli::{Cli, ThemeArgs, ThemeCommand};
use crate::error::CliError;
use crate::output::{self, Report};

use super::Session;

pub fn run(args: &ThemeArgs, session: &mut Session, cli: &Cli) -> Result<ExitCode, CliError> {
    if let ThemeCommand::Toggle = args.command {
        let mode = session.theme.toggle(session.prefs.as_ref())?;
        tracing::info!(theme = %mode, "theme preference saved");
    }

    output::render(&Report::theme(session.theme), cli.format, cli.pretty)?;
    Ok(ExitCode::SUCCESS)
}
