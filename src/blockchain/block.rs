use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hash::hash;
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A batch of transactions plus the linkage and proof that secure it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Build a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// The first block of every ledger. Its previous hash is a sentinel, not a digest.
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string())
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Canonical SHA-256 of this block.
    pub fn hash(&self) -> String {
        hash(self)
    }
}

/// Current time as fractional seconds, microsecond resolution.
fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
