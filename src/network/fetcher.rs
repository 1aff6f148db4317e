use std::future::Future;
use std::time::Duration;

use actix_web::http::StatusCode;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::{LedgerError, LedgerResult};

/// Upper bound on a peer's `/chain` body.
pub const MAX_CHAIN_BYTES: usize = 16 * 1024 * 1024;

/// What a node answers on `GET /chain`, and what resolution expects back from peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainResponse {
    pub fn new(chain: Vec<Block>) -> Self {
        Self {
            length: chain.len(),
            chain,
        }
    }
}

/// Source of peers' chains during consensus resolution.
pub trait ChainFetcher {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = LedgerResult<ChainResponse>>;
}

/// Fetches `GET http://{peer}/chain` with actix's HTTP client.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_body_bytes: MAX_CHAIN_BYTES,
        }
    }
}

impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> LedgerResult<ChainResponse> {
        let url = format!("http://{peer}/chain");
        debug!("RESOLVE - fetching {url}");

        let client = awc::Client::builder().timeout(self.timeout).finish();
        let mut res = client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| LedgerError::PeerUnreachable {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        if res.status() != StatusCode::OK {
            return Err(LedgerError::PeerStatus {
                peer: peer.to_string(),
                status: res.status().as_u16(),
            });
        }

        res.json::<ChainResponse>()
            .limit(self.max_body_bytes)
            .await
            .map_err(|e| LedgerError::PeerPayload {
                peer: peer.to_string(),
                reason: e.to_string(),
            })
    }
}


#[cfg(test)]
mod tests {
    use super::stub::serve_once;
    use super::*;

    fn fetcher() -> HttpChainFetcher {
        HttpChainFetcher::new(Duration::from_secs(5))
    }

    #[test]
    fn response_length_matches_chain() {
        let resp = ChainResponse::new(vec![Block::genesis()]);
        assert_eq!(resp.length, 1);
    }

    #[test]
    fn decodes_peer_wire_shape() {
        let body = r#"{
            "chain": [{
                "index": 1,
                "timestamp": 1700000000.5,
                "transactions": [],
                "proof": 100,
                "previous_hash": "1"
            }],
            "length": 1
        }"#;
        let resp: ChainResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.length, 1);
        assert!(resp.chain[0].is_genesis());
    }

    #[actix_web::test]
    async fn fetches_chain_from_peer() {
        let served = ChainResponse::new(vec![Block::genesis()]);
        let peer = serve_once("200 OK", serde_json::to_string(&served).unwrap());

        let got = fetcher().fetch_chain(&peer).await.unwrap();
        assert_eq!(got, served);
    }

    #[actix_web::test]
    async fn non_200_status_is_an_error() {
        let peer = serve_once("500 Internal Server Error", String::new());
        let res = fetcher().fetch_chain(&peer).await;
        assert!(matches!(res, Err(LedgerError::PeerStatus { status: 500, .. })));
    }

    #[actix_web::test]
    async fn undecodable_body_is_an_error() {
        let peer = serve_once("200 OK", r#"{"chain": "nope"}"#.to_string());
        let res = fetcher().fetch_chain(&peer).await;
        assert!(matches!(res, Err(LedgerError::PeerPayload { .. })));
    }
}
