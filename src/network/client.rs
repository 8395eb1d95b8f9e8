//! HTTP client for the rows service - the single chokepoint for every call
//!
//! Each call resets the indicator, performs one request, classifies the
//! result into an [`Outcome`] and drives the indicator from it.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;

use crate::config::Config;
use crate::constants::{SUCCESS_NOTICE, UNKNOWN_ERROR, UPLOAD_FIELD};
use crate::error::{Outcome, RequestError};
use crate::feedback::{FeedbackIndicator, Notice, Signal};
use crate::models::{Endpoint, HttpMethod, RequestDescriptor};
use crate::payload::Payload;

/// Calls the rows service offers to action callers
#[async_trait]
pub trait RowsApi: Send + Sync {
    /// Send a JSON request and decode the JSON answer
    async fn send(&self, request: RequestDescriptor) -> Outcome<Payload>;

    /// Upload a file of rows, one per line. Returns how many rows were accepted.
    async fn upload(&self, file: Option<&Path>) -> Outcome<u64>;
}

/// Orchestrates requests against the service and the feedback they produce
#[derive(Clone)]
pub struct RowsClient {
    http: reqwest::Client,
    base_url: Url,
    indicator: FeedbackIndicator,
}

impl RowsClient {
    pub fn new(http: reqwest::Client, base_url: Url, indicator: FeedbackIndicator) -> Self {
        RowsClient {
            http,
            base_url,
            indicator,
        }
    }

    pub fn from_config(config: &Config, indicator: FeedbackIndicator) -> anyhow::Result<Self> {
        Ok(Self::new(
            create_client(config.request_timeout()),
            config.base_url()?,
            indicator,
        ))
    }

    pub fn indicator(&self) -> &FeedbackIndicator {
        &self.indicator
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> Outcome<Url> {
        self.base_url
            .join(endpoint.as_str())
            .map_err(|e| RequestError::Network {
                message: format!("Invalid url for '{}': {}", endpoint, e),
            })
    }

    async fn execute(&self, request: &RequestDescriptor) -> Outcome<Payload> {
        let url = self.url(request.endpoint)?;

        let mut req_builder = match request.method {
            HttpMethod::GET => self.http.get(url.clone()),
            HttpMethod::POST => self.http.post(url.clone()),
            HttpMethod::DELETE => self.http.delete(url.clone()),
        }
        .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let start = Instant::now();
        tracing::info!(method = request.method.as_str(), %url, "Sending request");

        let resp = req_builder
            .send()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;

        tracing::info!(
            %url,
            status = status.as_u16(),
            time_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        // Error details arrive as JSON on non-2xx responses, so always decode
        let decoded = serde_json::from_slice::<Value>(&bytes);

        if !status.is_success() {
            let message = decoded
                .as_ref()
                .ok()
                .and_then(error_message)
                .unwrap_or(UNKNOWN_ERROR)
                .to_string();
            tracing::warn!(%url, status = status.as_u16(), %message, "Service reported failure");
            return Err(RequestError::Service {
                message,
                status: status.as_u16(),
            });
        }

        decoded
            .map(Payload::from)
            .map_err(|e| RequestError::MalformedResponse {
                message: format!("Malformed response: {}", e),
                status: Some(status.as_u16()),
            })
    }

    async fn execute_upload(&self, path: &Path, bytes: Vec<u8>) -> Outcome<u64> {
        let url = self.url(Endpoint::UploadFile)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("rows.txt"));

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        tracing::info!(%url, file = %path.display(), "Uploading file");

        // No content-type here: the multipart body sets its own boundary
        let resp = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;
        let status = resp.status();

        if !status.is_success() {
            return Err(RequestError::Service {
                message: format!("HTTP error! status: {}", status.as_u16()),
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;
        serde_json::from_slice::<u64>(&body).map_err(|_| RequestError::MalformedResponse {
            message: String::from("Upload response was not a row count"),
            status: Some(status.as_u16()),
        })
    }
}

#[async_trait]
impl RowsApi for RowsClient {
    async fn send(&self, request: RequestDescriptor) -> Outcome<Payload> {
        self.indicator.reset();

        let result = self.execute(&request).await;
        let timings = self.indicator.timings();

        match &result {
            Ok(_) => {
                self.indicator.set_outcome(Signal::Success {
                    label: String::from("✓"),
                    hold: timings.success_hold(),
                });
                self.indicator.post_notice(Notice::good(SUCCESS_NOTICE));
            }
            Err(e) => {
                self.indicator.post_notice(Notice::bad(e.message()));
                self.indicator.set_outcome(Signal::Error {
                    label: String::from("✗"),
                    hold: timings.error_hold(),
                });
            }
        }

        result
    }

    async fn upload(&self, file: Option<&Path>) -> Outcome<u64> {
        let path = match file {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(RequestError::NoFileSelected),
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| RequestError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        self.indicator.reset();

        let result = self.execute_upload(path, bytes).await;
        let timings = self.indicator.timings();

        match &result {
            Ok(count) => self.indicator.set_outcome(Signal::Success {
                label: format!("✓ Uploaded {} row(s)", count),
                hold: timings.upload_hold(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.status(), "Upload failed");
                self.indicator.set_outcome(Signal::Error {
                    label: String::from("✗ Upload failed"),
                    hold: timings.error_hold(),
                });
            }
        }

        result
    }
}

/// Non-empty `error` text of a decoded failure body
fn error_message(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
