use std::process::ExitCode;

use fxconv_core::input::validate_amount;
use fxconv_core::{ConversionViewModel, CurrencyCode, DebouncedInput, EditOutcome, InputConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::{Cli, InteractiveArgs};
use crate::error::CliError;
use crate::output::{self, Report};

use super::Session;

/// One stdin line, interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Edit(&'a str),
    Base(&'a str),
    Refresh,
    Theme,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Line<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Line::Edit(line);
    };

    match command.split_once(char::is_whitespace) {
        Some(("base", code)) => Line::Base(code.trim()),
        None if command == "refresh" => Line::Refresh,
        None if command == "theme" => Line::Theme,
        None if command == "quit" || command == "q" => Line::Quit,
        _ => Line::Unknown(line),
    }
}

pub async fn run(
    args: &InteractiveArgs,
    session: &mut Session,
    cli: &Cli,
) -> Result<ExitCode, CliError> {
    let base = CurrencyCode::parse(&args.base)?;
    let config = InputConfig::default();
    let amount = initial_amount(&args.amount, config)?;

    let mut view_model = ConversionViewModel::new(session.client.clone()).with_base_currency(base);
    view_model.set_amount(amount.as_str());

    let (mut input, mut commits) = DebouncedInput::new(amount, config);

    view_model.load().await;
    render(&view_model, session, cli)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let reached_eof = loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break true;
                };

                match parse_line(&line) {
                    Line::Edit(text) => match input.edit(text) {
                        EditOutcome::Rejected => eprintln!("ignored: '{text}' is not a valid amount"),
                        EditOutcome::Clamped => {
                            if let Some(error) = input.snapshot().error {
                                eprintln!("{error}");
                            }
                        }
                        EditOutcome::Accepted => {}
                    },
                    Line::Base(code) => match view_model.set_base_currency(code) {
                        Ok(true) => {
                            view_model.load_rates().await;
                            render(&view_model, session, cli)?;
                        }
                        Ok(false) => {}
                        Err(error) => eprintln!("{error}"),
                    },
                    Line::Refresh => {
                        view_model.refocus().await;
                        render(&view_model, session, cli)?;
                    }
                    Line::Theme => {
                        session.theme.toggle(session.prefs.as_ref())?;
                        render(&view_model, session, cli)?;
                    }
                    Line::Quit => break false,
                    Line::Unknown(line) => eprintln!("unknown command '{line}'"),
                }
            }
            Some(amount) = commits.recv() => {
                view_model.set_amount(amount);
                input.sync_external(view_model.amount());
                render(&view_model, session, cli)?;
            }
        }
    };

    // Piped input ends before the quiet period; keep the last edit.
    if reached_eof {
        if let Some(amount) = final_commit(input, &mut commits).await {
            view_model.set_amount(amount);
            render(&view_model, session, cli)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Validate the `--amount` flag the way an edit would, clamping oversized values.
fn initial_amount(raw: &str, config: InputConfig) -> Result<String, CliError> {
    let (amount, warning) = validate_amount(raw.trim(), config.max_value)?;
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
    Ok(amount)
}

/// Settle `input` and return the last value it committed, if any.
async fn final_commit(
    input: DebouncedInput,
    commits: &mut UnboundedReceiver<String>,
) -> Option<String> {
    input.settle().await;

    let mut last = None;
    while let Some(amount) = commits.recv().await {
        last = Some(amount);
    }
    last
}

fn render(view_model: &ConversionViewModel, session: &Session, cli: &Cli) -> Result<(), CliError> {
    let view = view_model.snapshot();
    output::render(&Report::converter(&view, session.theme), cli.format, cli.pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_edits() {
        assert_eq!(parse_line("123.4\n"), Line::Edit("123.4"));
        assert_eq!(parse_line(""), Line::Edit(""));
        assert_eq!(parse_line(":base eur"), Line::Base("eur"));
        assert_eq!(parse_line(":refresh"), Line::Refresh);
        assert_eq!(parse_line(":theme"), Line::Theme);
        assert_eq!(parse_line(":quit"), Line::Quit);
        assert_eq!(parse_line(":nope"), Line::Unknown(":nope"));
    }

    #[test]
    fn initial_amount_is_validated_and_clamped() {
        let config = InputConfig::default();

        assert_eq!(initial_amount(" 250 ", config).expect("valid"), "250");
        assert_eq!(
            initial_amount("5000000000", config).expect("clamped"),
            "1000000000"
        );

        let error = initial_amount("abc", config).expect_err("not numeric");
        assert_eq!(error.exit_code(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_keeps_pending_edit() {
        let (mut input, mut commits) = DebouncedInput::new("", InputConfig::default());
        input.edit("5");

        assert_eq!(final_commit(input, &mut commits).await.as_deref(), Some("5"));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_returns_when_edit_restores_initial_amount() {
        let (mut input, mut commits) = DebouncedInput::new("100", InputConfig::default());
        input.edit("5");
        input.edit("100");

        assert_eq!(final_commit(input, &mut commits).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_without_edits_returns_immediately() {
        let (input, mut commits) = DebouncedInput::new("100", InputConfig::default());

        assert_eq!(final_commit(input, &mut commits).await, None);
    }
}
