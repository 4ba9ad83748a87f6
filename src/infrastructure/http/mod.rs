// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the remote services.
//!
//! One [`HttpBackend`] implements all three service ports against a single
//! base URL:
//!
//! | Port                | Request                                   |
//! |---------------------|-------------------------------------------|
//! | [`ReportExtractor`] | `POST extract`, multipart field `file`    |
//! | [`RiskPredictor`]   | `POST predict`, JSON form values          |
//! | [`FeedbackSink`]    | `POST feedback`, JSON `{name, review}`    |
//!
//! Any response body of the shape `{"error": "..."}` is a rejection, whatever
//! the status code.

use crate::application::port::{
    FeedbackEntry, FeedbackSink, ReportExtractor, RiskPredictor, ServiceError,
};
use crate::domain::report::AcquiredFile;
use crate::domain::risk::{ExtractedData, FieldName, FormState, PredictionResult};
use crate::error::{Error, Result};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use std::time::Duration;

const USER_AGENT: &str = concat!("HeartShield/", env!("CARGO_PKG_VERSION"));

/// Validates a service base URL.
///
/// Only `http` and `https` are accepted. A trailing slash is added so that
/// endpoint paths resolve below the base instead of replacing its last
/// segment.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if the URL does not parse or has another
/// scheme.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{raw}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{raw}: not a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// reqwest-backed implementation of the service ports.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the TLS backend cannot
    /// be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ServiceError> {
        self.base
            .join(path)
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}

impl ReportExtractor for HttpBackend {
    fn extract(
        &self,
        file: &AcquiredFile,
    ) -> BoxFuture<'static, std::result::Result<ExtractedData, ServiceError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint("extract");
        let name = file.name().to_string();
        let mime = file.mime().to_string();
        let bytes = file.shared_bytes();

        async move {
            let url = endpoint?;
            let len = bytes.len() as u64;
            let part = reqwest::multipart::Part::stream_with_length(bytes, len)
                .file_name(name)
                .mime_str(&mime)
                .map_err(|e| ServiceError::Malformed(e.to_string()))?;
            let form = reqwest::multipart::Form::new().part("file", part);

            tracing::debug!(%url, "sending report for extraction");
            let request = client.post(url).multipart(form);
            let (status, body) = send(request).await?;
            parse_extraction(status, body.as_ref())
        }
        .boxed()
    }
}

impl RiskPredictor for HttpBackend {
    fn predict(
        &self,
        form: &FormState,
    ) -> BoxFuture<'static, std::result::Result<PredictionResult, ServiceError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint("predict");
        let payload = form_payload(form);

        async move {
            let url = endpoint?;
            tracing::debug!(%url, "requesting prediction");
            let (status, body) = send(client.post(url).json(&payload)).await?;
            parse_prediction(status, body.as_ref())
        }
        .boxed()
    }
}

impl FeedbackSink for HttpBackend {
    fn submit(
        &self,
        entry: &FeedbackEntry,
    ) -> BoxFuture<'static, std::result::Result<(), ServiceError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint("feedback");
        let payload = serde_json::json!({ "name": entry.name, "review": entry.review });

        async move {
            let url = endpoint?;
            let (status, body) = send(client.post(url).json(&payload)).await?;
            parse_feedback(status, body.as_ref())
        }
        .boxed()
    }
}

/// Sends a request and reads the body as JSON when it is JSON.
async fn send(
    request: reqwest::RequestBuilder,
) -> std::result::Result<(u16, Option<Value>), ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ServiceError::Transport(e.to_string()))?;
    Ok((status, serde_json::from_str(&text).ok()))
}

/// Serializes form values as the flat JSON object the prediction service
/// expects. Values are sent as entered.
#[must_use]
pub fn form_payload(form: &FormState) -> Value {
    let map: Map<String, Value> = form
        .iter()
        .map(|(field, value)| (field.key().to_string(), Value::String(value.trim().to_string())))
        .collect();
    Value::Object(map)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Returns the `error` field of an object body, if any.
fn error_reason(body: Option<&Value>) -> Option<String> {
    match body?.get("error")? {
        Value::String(reason) => Some(reason.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn reject(status: u16, body: Option<&Value>) -> ServiceError {
    ServiceError::Rejected {
        status: Some(status),
        reason: error_reason(body),
    }
}

/// Interprets an extraction response.
///
/// Keys that are not form fields are dropped; numbers are kept as their
/// decimal text; nulls count as not found.
///
/// # Errors
///
/// Returns a rejection for error payloads or failure statuses and
/// [`ServiceError::Malformed`] when a success body is not an object.
pub fn parse_extraction(
    status: u16,
    body: Option<&Value>,
) -> std::result::Result<ExtractedData, ServiceError> {
    if !is_success(status) || error_reason(body).is_some() {
        return Err(reject(status, body));
    }
    let Some(Value::Object(object)) = body else {
        return Err(ServiceError::Malformed(
            "extraction response is not an object".into(),
        ));
    };

    let pairs = object.iter().filter_map(|(key, value)| {
        FieldName::from_key(key)?;
        scalar_text(value).map(|text| (key.as_str(), text))
    });
    Ok(ExtractedData::from_pairs(pairs))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "yes" } else { "no" }.to_string()),
        _ => None,
    }
}

/// Interprets a prediction response.
///
/// # Errors
///
/// Returns a rejection for error payloads or failure statuses and
/// [`ServiceError::Malformed`] when the probability is missing, not a
/// number, or outside `[0, 100]`.
pub fn parse_prediction(
    status: u16,
    body: Option<&Value>,
) -> std::result::Result<PredictionResult, ServiceError> {
    if !is_success(status) || error_reason(body).is_some() {
        return Err(reject(status, body));
    }
    let body = body.ok_or_else(|| ServiceError::Malformed("empty prediction response".into()))?;

    let probability = match body.get("probability") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
    .ok_or_else(|| ServiceError::Malformed("missing or invalid probability".into()))?;

    let prediction = body
        .get("prediction")
        .and_then(Value::as_u64)
        .and_then(|p| u8::try_from(p).ok());

    Ok(PredictionResult {
        probability,
        prediction,
    })
}

/// Interprets a feedback response. Any success status without an error
/// payload counts as stored.
///
/// # Errors
///
/// Returns a rejection otherwise.
pub fn parse_feedback(status: u16, body: Option<&Value>) -> std::result::Result<(), ServiceError> {
    if !is_success(status) || error_reason(body).is_some() {
        return Err(reject(status, body));
    }
    Ok(())
}
