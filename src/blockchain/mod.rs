pub mod block;
pub mod hash;
pub mod model;
pub mod pow;

pub use block::Block;
pub use hash::hash;
pub use model::{Ledger, ValidChain};
pub use pow::proof_of_work_until;

/// Proof-of-Work target: required prefix of the proof digest (fixed difficulty 4).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
