use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::blockchain::Block;
use crate::error::{LedgerError, LedgerResult};
use crate::network::HttpChainFetcher;
use crate::node::Node;
use crate::transaction::Transaction;

/// Shared application state: the node and the client used to reach its peers.
pub struct AppState {
    pub node: Node,
    pub fetcher: HttpChainFetcher,
}

impl AppState {
    pub fn new(node: Node, peer_timeout: Duration) -> Self {
        Self {
            node,
            fetcher: HttpChainFetcher::new(peer_timeout),
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

impl NewTransactionRequest {
    /// Every field is required; the first missing one is reported.
    pub fn validate(self) -> LedgerResult<Transaction> {
        let sender = self.sender.ok_or(LedgerError::MissingField("sender"))?;
        let recipient = self.recipient.ok_or(LedgerError::MissingField("recipient"))?;
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        Ok(Transaction {
            sender,
            recipient,
            amount,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Node API Models ---------- */

#[derive(Debug, Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

impl RegisterNodesRequest {
    pub fn validate(self) -> LedgerResult<Vec<String>> {
        match self.nodes {
            Some(nodes) if !nodes.is_empty() => Ok(nodes),
            _ => Err(LedgerError::NoPeers),
        }
    }
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub chain: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_request_reports_missing_field() {
        let req: NewTransactionRequest =
            serde_json::from_str(r#"{"sender": "A", "amount": 3}"#).unwrap();
        assert!(matches!(
            req.validate(),
            Err(LedgerError::MissingField("recipient"))
        ));
    }

    #[test]
    fn complete_transaction_request_validates() {
        let req: NewTransactionRequest =
            serde_json::from_str(r#"{"sender": "A", "recipient": "B", "amount": 3}"#).unwrap();
        assert_eq!(req.validate().unwrap(), Transaction::new("A", "B", 3));
    }

    #[test]
    fn register_request_needs_nodes() {
        let missing: RegisterNodesRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(missing.validate(), Err(LedgerError::NoPeers)));
        let empty: RegisterNodesRequest = serde_json::from_str(r#"{"nodes": []}"#).unwrap();
        assert!(matches!(empty.validate(), Err(LedgerError::NoPeers)));
    }
}
