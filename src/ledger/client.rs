//! HTTP client for the ledger server.
//!
//! # Responsibilities
//! - One request per call, no retries, no queueing
//! - Bound every call with the configured timeout
//! - Decode responses into typed snapshots
//! - Tag each request with an `X-Request-Id`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::ledger::transaction::SignedTransaction;
use crate::ledger::types::{
    ChainSnapshot, LedgerError, LedgerResult, MineRequest, NodeListSnapshot, ServerReply,
};
use crate::observability::metrics;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Operations the client needs from the ledger server.
///
/// Calls are independent of each other; concurrent calls may settle in any
/// order.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// `GET /chain`
    async fn fetch_chain(&self) -> LedgerResult<ChainSnapshot>;

    /// `GET /nodes`
    async fn fetch_nodes(&self) -> LedgerResult<NodeListSnapshot>;

    /// `POST /transactions/new`. Takes ownership: the payload is sent once
    /// and dropped.
    async fn submit_transaction(&self, tx: SignedTransaction) -> LedgerResult<ServerReply>;

    /// `POST /mine`
    async fn request_mine(&self, miner_public_key: &str) -> LedgerResult<ServerReply>;
}

/// `reqwest`-backed implementation of [`LedgerApi`].
#[derive(Clone)]
pub struct LedgerClient {
    /// Shared connection pool.
    http: reqwest::Client,
    /// Server root without a trailing slash.
    base_url: String,
    /// Upper bound on one request, connect through body.
    timeout_secs: u64,
}

impl LedgerClient {
    /// Create a client for the configured server.
    ///
    /// Fails only if the base URL is not an absolute http(s) URL.
    pub fn new(config: &ServerConfig) -> LedgerResult<Self> {
        let parsed = url::Url::parse(&config.base_url).map_err(|e| LedgerError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LedgerError::InvalidUrl {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        tracing::debug!(base_url = %config.base_url, "Ledger client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and wait for the full body, bounded by the timeout.
    async fn exchange(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> LedgerResult<(reqwest::StatusCode, String)> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let fut = async {
            let response = request
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let result = match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(pair)) => Ok(pair),
            Ok(Err(e)) => Err(LedgerError::Transport(e.to_string())),
            Err(_) => Err(LedgerError::Timeout(self.timeout_secs)),
        };

        metrics::record_request_duration(endpoint, started.elapsed());
        match &result {
            Ok((status, _)) => {
                tracing::debug!(%request_id, endpoint, status = status.as_u16(), "Ledger request settled");
            }
            Err(e) => {
                tracing::warn!(%request_id, endpoint, error = %e, "Ledger request failed");
                metrics::record_request(endpoint, "error");
            }
        }
        result
    }

    /// GET a snapshot; anything but 2xx with a decodable body is an error.
    async fn get_snapshot<T: DeserializeOwned>(&self, endpoint: &'static str) -> LedgerResult<T> {
        let (status, body) = self
            .exchange(endpoint, self.http.get(self.endpoint_url(endpoint)))
            .await?;

        if !status.is_success() {
            metrics::record_request(endpoint, "status");
            return Err(LedgerError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        match decode(endpoint, &body) {
            Ok(decoded) => {
                metrics::record_request(endpoint, "ok");
                Ok(decoded)
            }
            Err(e) => {
                metrics::record_request(endpoint, "decode");
                Err(e)
            }
        }
    }

    /// POST a JSON body and return the server's `{message}` verbatim.
    ///
    /// The status code is not interpreted: the server decides acceptance and
    /// reports it in the message.
    async fn post_for_reply<B: Serialize + Sync>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> LedgerResult<ServerReply> {
        let (status, text) = self
            .exchange(endpoint, self.http.post(self.endpoint_url(endpoint)).json(body))
            .await?;

        match decode::<ServerReply>(endpoint, &text) {
            Ok(reply) => {
                let outcome = if status.is_success() { "ok" } else { "rejected" };
                metrics::record_request(endpoint, outcome);
                Ok(reply)
            }
            Err(e) if !status.is_success() => {
                metrics::record_request(endpoint, "status");
                tracing::debug!(endpoint, error = %e, "Undecodable error response");
                Err(LedgerError::Status {
                    endpoint,
                    status: status.as_u16(),
                })
            }
            Err(e) => {
                metrics::record_request(endpoint, "decode");
                Err(e)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> LedgerResult<T> {
    serde_json::from_str(body).map_err(|e| LedgerError::Decode {
        endpoint,
        reason: e.to_string(),
    })
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn fetch_chain(&self) -> LedgerResult<ChainSnapshot> {
        self.get_snapshot("/chain").await
    }

    async fn fetch_nodes(&self) -> LedgerResult<NodeListSnapshot> {
        self.get_snapshot("/nodes").await
    }

    async fn submit_transaction(&self, tx: SignedTransaction) -> LedgerResult<ServerReply> {
        let body = tx.to_request_body();
        self.post_for_reply("/transactions/new", &body).await
    }

    async fn request_mine(&self, miner_public_key: &str) -> LedgerResult<ServerReply> {
        let body = MineRequest { miner_public_key };
        self.post_for_reply("/mine", &body).await
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = LedgerClient::new(&test_config("http://localhost:5000/")).unwrap();
        assert_eq!(client.endpoint_url("/chain"), "http://localhost:5000/chain");
    }

    #[test]
    fn test_rejects_bad_url() {
        let result = LedgerClient::new(&test_config("not a url"));
        assert!(matches!(result, Err(LedgerError::InvalidUrl { .. })));

        let result = LedgerClient::new(&test_config("ftp://localhost"));
        assert!(result.unwrap_err().to_string().contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is almost never listening locally
        let client = LedgerClient::new(&test_config("http://127.0.0.1:9")).unwrap();
        let result = client.fetch_chain().await;
        assert!(matches!(
            result,
            Err(LedgerError::Transport(_)) | Err(LedgerError::Timeout(_))
        ));
    }
}
