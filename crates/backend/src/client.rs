//! Backend HTTP client.
//!
//! Async client using `reqwest`; every poll carries the configured timeout.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;

use linkhub_protocol::SystrayResponse;
use linkhub_protocol::constants::SYSTRAY_ENDPOINT;
use reqwest::StatusCode;

/// Errors from a backend poll.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("non-200 response code: {status}")]
    Status { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackendError {
    /// Returns `true` if the request hit the poll timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Http(e) if e.is_timeout())
    }
}

/// Boxed future returned by [`StatusSource::poll`].
pub type PollFuture<'a> = Pin<Box<dyn Future<Output = Result<SystrayResponse, BackendError>> + Send + 'a>>;

/// Anything that can produce one status snapshot per call.
pub trait StatusSource: Send + Sync {
    fn poll(&self) -> PollFuture<'_>;
}

/// OpenLinkHub backend client.
pub struct Client {
    http: reqwest::Client,
    url: String,
}

impl Client {
    /// Creates a client for the backend at `addr`.
    pub fn new(addr: SocketAddr, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: format!("http://{addr}{SYSTRAY_ENDPOINT}"),
        })
    }

    /// Full URL polled by this client.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and decodes one snapshot.
    pub async fn fetch(&self) -> Result<SystrayResponse, BackendError> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();

        if status != StatusCode::OK {
            return Err(BackendError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let response: SystrayResponse = serde_json::from_slice(&body)?;
        tracing::debug!(
            devices = response.data.battery.len(),
            "backend snapshot received"
        );
        Ok(response)
    }
}

impl StatusSource for Client {
    fn poll(&self) -> PollFuture<'_> {
        Box::pin(self.fetch())
    }
}
