use std::time::Duration;

use log::debug;
use serde_json::Value;
use ureq::Agent;
use ureq::http::StatusCode;

use crate::error::{Error, Result};

pub const DEFAULT_URL: &str = "http://localhost:8080/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One lookup against the rate service. Currencies and date are expected to be validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    pub url: String,
    pub api_key: String,
    pub from: String,
    pub to: String,
    pub date: String,
}

impl RateRequest {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            from: from.into(),
            to: to.into(),
            date: date.into(),
        }
    }
}

/// POST the request to the service and return the JSON body as-is.
///
/// The pair and date go in the query string and the key goes in the form body. Gives up after
/// `timeout`. Anything other than `200 OK` is treated as a failed connection.
pub fn request_rate(request: &RateRequest, timeout: Duration) -> Result<Value> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        // Ignore proxy environment variables
        .proxy(None)
        .build()
        .into();

    debug!(
        "requesting {} -> {} on {} from {}",
        request.from, request.to, request.date, request.url
    );
    let mut resp = agent
        .post(request.url.as_str())
        .query("from", &request.from)
        .query("to", &request.to)
        .query("date", &request.date)
        .send_form([("key", request.api_key.as_str())])
        .map_err(|source| Error::Connection {
            url: request.url.clone(),
            source,
        })?;

    if resp.status() != StatusCode::OK {
        return Err(Error::Status(resp.status().as_u16()));
    }

    // A body cut short by a timeout or a dropped connection is a connection failure, not bad JSON
    let body = resp
        .body_mut()
        .read_to_string()
        .map_err(|source| Error::Connection {
            url: request.url.clone(),
            source,
        })?;
    serde_json::from_str(&body).map_err(Error::MalformedResponse)
}

/// The service's error message, if `payload` is an object with a truthy `"error"` member.
pub fn api_error(payload: &Value) -> Option<String> {
    let error = payload.as_object()?.get("error")?;
    if !is_truthy(error) {
        return None;
    }
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
