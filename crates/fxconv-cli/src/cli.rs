//! CLI argument definitions for fxconv.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `convert` | Convert an amount into every paired currency |
//! | `currencies` | List the currency catalog |
//! | `rates` | List normalized rates for a base currency |
//! | `theme` | Show or toggle the persisted theme |
//! | `interactive` | Drive the debounced amount input from stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--env` | build mode | `development` or `production` endpoint |
//! | `--base-url` | per mode | Ticker API base URL |
//! | `--timeout-ms` | `3000` | Request timeout in ms |
//! | `--offline-fixture` | none | Serve a recorded ticker payload |
//! | `--prefs` | config dir | Preference file for the theme |
//! | `--log-level` | `warn` | Default tracing filter |
//!
//! # Examples
//!
//! ```bash
//! fxconv convert 250 --base EUR
//! fxconv rates --format json --pretty
//! fxconv --offline-fixture tickers.json currencies
//! fxconv theme toggle
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fxconv_core::BuildMode;

/// fxconv - currency converter over live Uphold tickers.
#[derive(Debug, Parser)]
#[command(
    name = "fxconv",
    author,
    version,
    about = "Convert an amount into every currency quoted against a base",
    long_about = "fxconv loads the Uphold ticker catalog, fetches the rates quoted against a \
base currency and converts an amount into each paired currency.\n\
\n\
Use 'fxconv <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Endpoint set to target (development proxy or production sandbox).
    #[arg(long = "env", global = true)]
    pub mode: Option<BuildMode>,

    /// Ticker API base URL; overrides --env and FXCONV_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 3000)]
    pub timeout_ms: u64,

    /// Read ticker payloads from this JSON file instead of the network.
    #[arg(long, global = true, value_name = "FILE")]
    pub offline_fixture: Option<PathBuf>,

    /// Preference file holding the theme choice.
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal layout.
    Table,
    /// Single JSON document.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an amount into every currency paired with the base.
    ///
    /// # Examples
    ///
    ///   fxconv convert 100
    ///   fxconv convert 2500.50 --base EUR
    Convert(ConvertArgs),

    /// List every currency referenced by the ticker catalog.
    Currencies,

    /// List normalized rates quoted against a base currency.
    ///
    /// # Examples
    ///
    ///   fxconv rates
    ///   fxconv rates --base BTC --format json
    Rates(RatesArgs),

    /// Show or toggle the light/dark theme preference.
    Theme(ThemeArgs),

    /// Type amounts line by line; the view re-renders after each commit.
    ///
    /// Lines are edits to the amount field. Commands:
    ///   :base CUR   switch base currency
    ///   :refresh    refetch rates (window refocus)
    ///   :theme      toggle theme
    ///   :quit       exit
    Interactive(InteractiveArgs),
}

/// Arguments for the `convert` command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount in the base currency (digits with at most one '.').
    pub amount: String,

    /// Base currency code.
    #[arg(long, default_value = fxconv_core::DEFAULT_CURRENCY)]
    pub base: String,
}

/// Arguments for the `rates` command.
#[derive(Debug, Args)]
pub struct RatesArgs {
    /// Base currency code.
    #[arg(long, default_value = fxconv_core::DEFAULT_CURRENCY)]
    pub base: String,
}

/// Arguments for the `theme` command group.
#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommand,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    /// Print the resolved theme.
    Show,
    /// Flip the theme and persist the choice.
    Toggle,
}

/// Arguments for the `interactive` command.
#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Initial base currency code.
    #[arg(long, default_value = fxconv_core::DEFAULT_CURRENCY)]
    pub base: String,

    /// Initial amount.
    #[arg(long, default_value = "")]
    pub amount: String,
}
