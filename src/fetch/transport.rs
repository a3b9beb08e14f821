//! The HTTP seam under [`crate::RetryingFetcher`].

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::Client;
use thiserror::Error;

/// Raw outcome of a GET that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, connect, timeout, body read).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Issues a single HTTP GET. Implementations must not retry on their own.
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<TransportResponse, TransportError>>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            Ok(TransportResponse {
                status,
                body: body.to_vec(),
            })
        }
        .boxed()
    }
}
