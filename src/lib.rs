use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::debug;
use serde_json::Value;

pub mod error;
pub mod error_log;
pub mod persist;
pub mod request;
pub mod validate;

pub use error::{EXIT_FAILURE, EXIT_USAGE, Error, Result};
pub use error_log::{ErrorLog, FileLog, MemoryLog};
pub use persist::{Layout, save_json};
pub use request::{DEFAULT_TIMEOUT, DEFAULT_URL, RateRequest, api_error, request_rate};
pub use validate::{DateWindow, KNOWN_CURRENCIES, validate_currency, validate_date};

/// Request an exchange rate for a single date from the local rate service and save the JSON
/// response under data/.
///
/// Failures are appended to error.log. Supported currencies: EUR, MDL, RON, RUB, UAH, USD.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Source currency (USD, EUR, MDL, etc.)
    #[arg(value_name = "FROM")]
    pub from: String,
    /// Target currency
    #[arg(value_name = "TO")]
    pub to: String,
    /// Date of the rate (format: YYYY-MM-DD, between 2025-01-01 and 2025-09-15)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// API key (falls back to the API_KEY environment variable)
    #[arg(short, long, value_name = "API_KEY")]
    pub key: Option<String>,
    /// Rate service URL
    #[arg(short, long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Project root containing data/ and error.log
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
    /// Seconds to wait for the service before giving up
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl Cli {
    pub fn layout(&self) -> Layout {
        Layout::new(&self.root)
    }
}

/// Pick the API key: the `--key` flag first, then the `API_KEY` environment value.
///
/// Empty values count as missing.
pub fn resolve_api_key(flag: Option<&str>, env: Option<&str>) -> Result<String> {
    [flag, env]
        .into_iter()
        .flatten()
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingCredential)
}

/// Run one lookup, logging any failure to `log`. Returns the process exit code.
///
/// `env_key` is the value of the `API_KEY` environment variable, if set.
pub fn run(cli: &Cli, env_key: Option<&str>, log: &mut impl ErrorLog) -> u8 {
    match fetch_and_save(cli, env_key) {
        Ok(path) => {
            println!("OK - result saved in: {}", path.display());
            0
        }
        Err(e) => {
            log.log_error(&e.to_string());
            e.exit_code()
        }
    }
}

/// Resolve the key, validate inputs, request the rate, and save the response.
///
/// Returns the path of the saved file.
pub fn fetch_and_save(cli: &Cli, env_key: Option<&str>) -> Result<PathBuf> {
    let api_key = resolve_api_key(cli.key.as_deref(), env_key)?;

    let from = validate_currency(&cli.from)?;
    let to = validate_currency(&cli.to)?;
    let date = validate_date(&cli.date)?;

    let request = RateRequest::new(&cli.url, api_key, from, to, date);
    let payload = request_rate(&request, Duration::from_secs(cli.timeout))?;

    let layout = cli.layout();
    if let Some(message) = api_error(&payload) {
        let path = layout.error_file(&request.from, &request.to, &request.date);
        if let Err(e) = save_error_payload(&payload, &path) {
            debug!("discarding failure to save error response: {e}");
        }
        return Err(Error::ApiReported(message));
    }

    let path = layout.rate_file(&request.from, &request.to, &request.date);
    save_json(&payload, &path)?;
    Ok(path)
}

/// Best-effort copy of an error response for debugging.
///
/// The caller reports the API error regardless of whether this succeeds.
pub fn save_error_payload(payload: &Value, path: &Path) -> Result<()> {
    save_json(payload, path)
}
