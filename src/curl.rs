//! One-shot HTTP helper for talking to lab services.
//!
//! A single blocking request per call with a fixed timeout. Nothing is
//! pooled or retried: a failure is returned to the caller as is.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{blocking::Client, header::CONTENT_TYPE, Method};
use thiserror::Error;

/// Whole-request timeout applied to every call.
pub const TIMEOUT: Duration = Duration::from_secs(10);
/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = "kpl-curl/1.0";

/// The stage at which a request failed.
#[derive(Debug, Error)]
pub enum CurlError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),
    #[error("failed to create request: {0}")]
    Build(#[source] reqwest::Error),
    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("failed to read response: {0}")]
    Read(#[source] reqwest::Error),
}

/// Sends `method url` with an optional JSON body and returns the response body.
///
/// The body is returned whatever the status code; non-2xx statuses are only
/// logged.
pub fn curl(url: &str, method: &str, body: Option<&str>) -> Result<String, CurlError> {
    let http_method = Method::from_bytes(method.as_bytes())
        .map_err(|_| CurlError::InvalidMethod(method.to_string()))?;

    let client = Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(CurlError::Build)?;

    let mut builder = client
        .request(http_method, url)
        .header(CONTENT_TYPE, "application/json");
    if let Some(body) = body {
        builder = builder.body(body.to_owned());
    }
    let request = builder.build().map_err(CurlError::Build)?;

    debug!("{} {}", method, url);
    let response = client.execute(request).map_err(|e| {
        warn!("{} {} failed: {}", method, url, e);
        CurlError::Send(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} {} returned {}", method, url, status);
    }
    response.text().map_err(CurlError::Read)
}

/// `"t"` or `"f"`, the boolean spelling lab services expect in query strings.
pub fn tf_flag(value: bool) -> &'static str {
    if value {
        "t"
    } else {
        "f"
    }
}
