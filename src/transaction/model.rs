use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Sender recorded on the entry that rewards the miner of a block.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner for each forged block.
pub const MINING_REWARD: u64 = 1;

/// A free-form transfer record. Nothing about it is validated beyond presence.
///
/// `amount` is any JSON number (integer, negative or fractional) and is
/// kept exactly as received so it hashes the same on every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// The entry a node appends to its own pool right before minting a block.
    pub fn reward(miner_id: &str) -> Self {
        Self::new(REWARD_SENDER, miner_id, MINING_REWARD)
    }
}
