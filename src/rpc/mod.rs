//! Recent-blockhash lookup against a Solana RPC node.
//!
//! The builder only needs one thing from the network: a blockhash to bound the
//! validity window of the transaction it returns. That lookup sits behind
//! [`BlockhashSource`] so handlers receive it as an injected collaborator.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::hash::Hash;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("RPC request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("RPC request failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait BlockhashSource: Send + Sync + 'static {
    async fn latest_blockhash(&self) -> Result<Hash, RpcError>;
}

/// JSON-RPC backed source; one `getLatestBlockhash` call per lookup.
pub struct RpcBlockhashSource {
    url: String,
    client: RpcClient,
    timeout: Duration,
}

impl RpcBlockhashSource {
    pub fn new(url: String, timeout: Duration) -> Self {
        debug!("[RPC] Blockhash source on {} (timeout {:?})", url, timeout);
        Self {
            client: RpcClient::new_with_timeout(url.clone(), timeout),
            url,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BlockhashSource for RpcBlockhashSource {
    async fn latest_blockhash(&self) -> Result<Hash, RpcError> {
        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.client.get_latest_blockhash()).await;

        match result {
            Ok(Ok(hash)) => {
                debug!("[RPC] Blockhash {} in {}ms", hash, start.elapsed().as_millis());
                Ok(hash)
            }
            Ok(Err(e)) => {
                warn!("[RPC] getLatestBlockhash failed on {}: {}", self.url, e);
                Err(RpcError::Request(e.to_string()))
            }
            Err(_) => {
                warn!("[RPC] getLatestBlockhash timed out on {}", self.url);
                Err(RpcError::Timeout(self.timeout))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_reports_millis() {
        let err = RpcError::Timeout(Duration::from_millis(2500));
        assert_eq!(err.to_string(), "RPC request timed out after 2500ms");
    }

    #[tokio::test]
    async fn unreachable_node_is_a_request_error() {
        // Port 9 (discard) on localhost is not an RPC node
        let source = RpcBlockhashSource::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(500),
        );
        let err = source.latest_blockhash().await.unwrap_err();
        assert!(matches!(err, RpcError::Request(_) | RpcError::Timeout(_)));
    }

    #[tokio::test]
    async fn fresh_source_never_repeats() {
        let source = testing::FreshBlockhash::default();
        let a = source.latest_blockhash().await.unwrap();
        let b = source.latest_blockhash().await.unwrap();
        assert_ne!(a, b);
        assert_eq!(source.calls(), 2);
    }
}
