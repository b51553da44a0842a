use std::path::PathBuf;

use jiff::civil::Date;
use thiserror::Error;

/// Exit code for bad arguments, failed validation, or a missing API key.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for anything that goes wrong after the inputs were accepted.
pub const EXIT_FAILURE: u8 = 1;

/// Every way a single rate lookup can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not shaped like a currency code or an ISO date
    #[error("{0}")]
    InvalidFormat(&'static str),

    /// Well-formed code that the service does not support
    #[error("Unknown currency: {code}. Supported: {supported}")]
    UnknownCurrency { code: String, supported: String },

    /// Real date outside the window the service has data for
    #[error("Date outside the acceptable period: {min} - {max}")]
    OutOfRange { min: Date, max: Date },

    /// Neither `--key` nor `API_KEY` gave a usable key
    #[error("API key not provided. Specify --key or set the API_KEY environment variable.")]
    MissingCredential,

    /// The exchange did not complete (refused, unreachable, timed out, body cut short)
    #[error("Error connecting to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The service answered with something other than 200 OK
    #[error("HTTP {0} from server")]
    Status(u16),

    /// Complete body that doesn't parse as JSON
    #[error("The server response is not JSON")]
    MalformedResponse(#[source] serde_json::Error),

    /// JSON object with a truthy `"error"` member
    #[error("API returned error: {0}")]
    ApiReported(String),

    /// Creating the data directory or writing the file failed
    #[error("Failed to save file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// Problems with what the user typed map to [`EXIT_USAGE`]; problems talking to the service
    /// or writing results map to [`EXIT_FAILURE`].
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InvalidFormat(_)
            | Error::UnknownCurrency { .. }
            | Error::OutOfRange { .. }
            | Error::MissingCredential => EXIT_USAGE,
            Error::Connection { .. }
            | Error::Status(_)
            | Error::MalformedResponse(_)
            | Error::ApiReported(_)
            | Error::Io { .. } => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::InvalidFormat("bad").exit_code(), EXIT_USAGE);
        assert_eq!(Error::MissingCredential.exit_code(), EXIT_USAGE);
        assert_eq!(
            Error::OutOfRange {
                min: date(2025, 1, 1),
                max: date(2025, 9, 15)
            }
            .exit_code(),
            EXIT_USAGE
        );
        assert_eq!(Error::Status(500).exit_code(), EXIT_FAILURE);
        assert_eq!(
            Error::ApiReported("no data".into()).exit_code(),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::OutOfRange {
                min: date(2025, 1, 1),
                max: date(2025, 9, 15)
            }
            .to_string(),
            "Date outside the acceptable period: 2025-01-01 - 2025-09-15"
        );
        assert_eq!(
            Error::ApiReported("no data".into()).to_string(),
            "API returned error: no data"
        );
        assert_eq!(Error::Status(503).to_string(), "HTTP 503 from server");
    }
}
