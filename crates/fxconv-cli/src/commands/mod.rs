mod convert;
mod currencies;
mod interactive;
mod rates;
mod theme;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use fxconv_core::theme::prefers_dark_from_colorfgbg;
use fxconv_core::{
    ApiConfig, HttpClient, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    QueryClient, RateService, StaticHttpClient, ThemeState, TickerSource, UpholdTickerSource,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Collaborators shared by every command.
pub struct Session {
    pub client: QueryClient,
    pub prefs: Box<dyn PreferenceStore>,
    pub theme: ThemeState,
}

impl Session {
    pub async fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let source = ticker_source(cli).await?;
        let client = QueryClient::new(RateService::new(source));
        let prefs = preference_store(cli);
        let theme = ThemeState::resolve(prefs.as_ref(), system_prefers_dark())?;

        Ok(Self {
            client,
            prefs,
            theme,
        })
    }
}

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let mut session = Session::from_cli(cli).await?;

    match &cli.command {
        Command::Convert(args) => convert::run(args, &session, cli).await,
        Command::Currencies => currencies::run(&session, cli).await,
        Command::Rates(args) => rates::run(args, &session, cli).await,
        Command::Theme(args) => theme::run(args, &mut session, cli),
        Command::Interactive(args) => interactive::run(args, &mut session, cli).await,
    }
}

fn api_config(cli: &Cli) -> Result<ApiConfig, CliError> {
    let mut config = match cli.mode {
        Some(mode) => {
            let config = ApiConfig::for_mode(mode);
            match env::var("FXCONV_API_BASE_URL") {
                Ok(base_url) => config.with_base_url(base_url),
                Err(_) => config,
            }
        }
        None => ApiConfig::from_env()?,
    };

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    Ok(config.with_timeout_ms(cli.timeout_ms))
}

async fn ticker_source(cli: &Cli) -> Result<Arc<dyn TickerSource>, CliError> {
    let config = api_config(cli)?;

    let source = match &cli.offline_fixture {
        Some(path) => {
            let body = tokio::fs::read_to_string(path).await?;
            tracing::info!(path = %path.display(), "serving tickers from fixture");
            let http_client: Arc<dyn HttpClient> = Arc::new(StaticHttpClient::json(body));
            UpholdTickerSource::with_http_client(http_client, config)
        }
        None => {
            tracing::debug!(base_url = %config.base_url, "using live ticker endpoint");
            UpholdTickerSource::new(config)
        }
    };
    Ok(Arc::new(source))
}

fn preference_store(cli: &Cli) -> Box<dyn PreferenceStore> {
    match cli.prefs.clone().or_else(default_prefs_path) {
        Some(path) => Box::new(JsonFilePreferenceStore::new(path)),
        None => Box::new(MemoryPreferenceStore::new()),
    }
}

fn default_prefs_path() -> Option<PathBuf> {
    let config_dir = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_dir.join("fxconv").join("prefs.json"))
}

fn system_prefers_dark() -> bool {
    prefers_dark_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
}
