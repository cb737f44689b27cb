//! Outbound delivery of submitted text to the responder.
//!
//! The widget only sees [`MessageTransport`]; the production implementation
//! posts a form-encoded `data` field to `<server>/msg` and hands back the
//! response body untouched.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::utils::url::endpoint_url;

pub const MESSAGE_ENDPOINT: &str = "msg";
pub const MESSAGE_FIELD: &str = "data";

/// Errors that can occur while delivering a submission.
#[derive(Debug)]
pub enum TransportError {
    /// The request could not be sent or timed out.
    Request(reqwest::Error),

    /// The responder answered with a non-success status.
    Status {
        /// HTTP status code returned by the responder.
        status: u16,
        /// Response body, kept for diagnostics only.
        body: String,
    },

    /// The response body could not be read.
    Body(reqwest::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(source) => write!(f, "request failed: {source}"),
            TransportError::Status { status, body } if body.trim().is_empty() => {
                write!(f, "responder returned HTTP {status}")
            }
            TransportError::Status { status, body } => {
                write!(f, "responder returned HTTP {status}: {}", body.trim())
            }
            TransportError::Body(source) => write!(f, "failed to read response body: {source}"),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Request(source) | TransportError::Body(source) => Some(source),
            TransportError::Status { .. } => None,
        }
    }
}

#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Deliver `text` and return the reply payload.
    async fn send(&self, text: &str) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, server_url: &str) -> Self {
        Self {
            client,
            url: endpoint_url(server_url, MESSAGE_ENDPOINT),
        }
    }

    /// Build a transport with its own client. `timeout` of `None` waits
    /// indefinitely for the responder.
    pub fn with_timeout(
        server_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        Self::from_builder(reqwest::Client::builder(), server_url, timeout)
    }

    /// Finish `builder` with the request timeout applied. An elapsed timeout
    /// surfaces as [`TransportError::Request`].
    pub fn from_builder(
        mut builder: reqwest::ClientBuilder,
        server_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Request)?;
        Ok(Self::new(client, server_url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn send(&self, text: &str) -> Result<String, TransportError> {
        debug!(url = %self.url, bytes = text.len(), "posting message");

        let response = self
            .client
            .post(&self.url)
            .form(&[(MESSAGE_FIELD, text)])
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(TransportError::Body)?;
        debug!(status = status.as_u16(), bytes = body.len(), "reply received");
        Ok(body)
    }
}
