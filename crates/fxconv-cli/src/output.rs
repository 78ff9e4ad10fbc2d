use std::fmt::Write as _;

use fxconv_core::view_model::{
    LOADING_CONVERTER_MESSAGE, LOADING_RATES_MESSAGE, NO_CURRENCIES_MESSAGE, NO_RATES_MESSAGE,
};
use fxconv_core::{ConversionView, NormalizedRate, RatesPanel, Screen, ThemeMode, ThemeState};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub const TITLE: &str = "Currency Converter";
pub const INTRO: &str = "Unlock global currency conversion with confidence. We provide up-to-date \
exchange rates and a transparent fee structure, so you can compare and convert with peace of mind \
and no hidden charges.";

/// Everything a command can print.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report<'a> {
    Converter {
        theme: ThemeMode,
        theme_label: &'static str,
        view: &'a ConversionView,
    },
    Currencies {
        currencies: &'a [String],
    },
    Rates {
        base_currency: &'a str,
        rates: &'a [NormalizedRate],
    },
    Theme {
        theme: ThemeMode,
        theme_label: &'static str,
    },
}

impl<'a> Report<'a> {
    pub fn converter(view: &'a ConversionView, theme: ThemeState) -> Self {
        Self::Converter {
            theme: theme.mode(),
            theme_label: theme.label(),
            view,
        }
    }

    pub fn theme(theme: ThemeState) -> Self {
        Self::Theme {
            theme: theme.mode(),
            theme_label: theme.label(),
        }
    }
}

pub fn render(report: &Report<'_>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(report)),
    }

    Ok(())
}

pub fn render_table(report: &Report<'_>) -> String {
    let mut out = String::new();
    match report {
        Report::Converter {
            theme,
            theme_label,
            view,
        } => {
            let _ = writeln!(out, "{TITLE}  [{theme}] {theme_label}");
            let _ = writeln!(out, "{INTRO}");
            let _ = writeln!(out);
            render_screen(&mut out, view);
        }
        Report::Currencies { currencies } => {
            if currencies.is_empty() {
                let _ = writeln!(out, "{NO_CURRENCIES_MESSAGE}");
            }
            for code in currencies.iter() {
                let _ = writeln!(out, "{code}");
            }
        }
        Report::Rates {
            base_currency,
            rates,
        } => {
            let _ = writeln!(out, "base: {base_currency}");
            if rates.is_empty() {
                let _ = writeln!(out, "{NO_RATES_MESSAGE}");
            }
            for rate in rates.iter() {
                let _ = writeln!(
                    out,
                    "{:<12} {:<8} ask {:>20} bid {:>20}",
                    rate.pair, rate.paired_currency, rate.ask, rate.bid
                );
            }
        }
        Report::Theme { theme, theme_label } => {
            let _ = writeln!(out, "theme: {theme}");
            let _ = writeln!(out, "toggle: {theme_label}");
        }
    }
    out
}

fn render_screen(out: &mut String, view: &ConversionView) {
    match view.screen() {
        Screen::LoadingConverter => {
            let _ = writeln!(out, "{LOADING_CONVERTER_MESSAGE}");
        }
        Screen::Failed(error) => {
            let _ = writeln!(out, "{}", error.alert());
        }
        Screen::NoCurrencies => {
            let _ = writeln!(out, "{NO_CURRENCIES_MESSAGE}");
        }
        Screen::Converter { rates } => {
            let amount = if view.amount.is_empty() { "0" } else { view.amount.as_str() };
            let _ = writeln!(out, "Amount: {amount} {}", view.base_currency);
            let _ = writeln!(out);
            match rates {
                RatesPanel::Loading { placeholders } => {
                    let _ = writeln!(out, "{LOADING_RATES_MESSAGE}");
                    for _ in 0..placeholders {
                        let _ = writeln!(out, "  [..]  ........");
                    }
                }
                RatesPanel::Empty => {
                    let _ = writeln!(out, "{NO_RATES_MESSAGE}");
                }
                RatesPanel::Rows(rows) => {
                    for row in rows {
                        let _ = writeln!(
                            out,
                            "  [{:<2}]  {:>22}  {}",
                            row.icon, row.converted_value, row.paired_currency
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxconv_core::ViewError;

    fn view() -> ConversionView {
        ConversionView {
            amount: String::from("100"),
            base_currency: String::from("USD"),
            rates: vec![NormalizedRate {
                pair: String::from("EUR-USD"),
                ask: String::from("1.080000"),
                bid: String::from("1.070000"),
                currency: String::from("USD"),
                paired_currency: String::from("EUR"),
            }],
            currencies: vec![String::from("EUR"), String::from("USD")],
            loading_currencies: false,
            loading_rates: false,
            error: None,
        }
    }

    #[test]
    fn converter_table_shows_header_and_rows() {
        let view = view();
        let table = render_table(&Report::converter(&view, ThemeState::new(true)));

        assert!(table.starts_with("Currency Converter  [dark] Switch to light mode"));
        assert!(table.contains("Amount: 100 USD"));
        assert!(table.contains("[EU]"));
        assert!(table.contains("108.00  EUR"));
    }

    #[test]
    fn loading_rates_render_five_placeholders() {
        let mut view = view();
        view.loading_rates = true;
        let table = render_table(&Report::converter(&view, ThemeState::new(false)));

        assert!(table.contains(LOADING_RATES_MESSAGE));
        assert_eq!(table.matches("[..]").count(), 5);
    }

    #[test]
    fn error_replaces_converter() {
        let mut view = view();
        view.error = Some(ViewError {
            code: "source.unavailable",
            message: String::from("API Error"),
        });
        let table = render_table(&Report::converter(&view, ThemeState::new(false)));

        assert!(table.contains("Error: API Error"));
        assert!(!table.contains("Amount:"));
    }

    #[test]
    fn json_report_is_tagged() {
        let view = view();
        let value = serde_json::to_value(Report::converter(&view, ThemeState::new(false)))
            .expect("serializable");

        assert_eq!(value["kind"], "converter");
        assert_eq!(value["theme"], "light");
        assert_eq!(value["view"]["rates"][0]["paired_currency"], "EUR");
    }
}
