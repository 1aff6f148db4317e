use std::sync::atomic::{AtomicBool, Ordering};

use super::DIFFICULTY_PREFIX;
use super::hash::sha256_hex;

/// Does the digest of `"{last_proof}{proof}"` start with [`DIFFICULTY_PREFIX`]?
///
/// The two proofs are concatenated as decimal digits. Mining and peer-chain
/// validation share this predicate, so every node must use it unchanged.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    sha256_hex(guess.as_bytes()).starts_with(DIFFICULTY_PREFIX)
}

/// Smallest `p >= 0` with `valid_proof(last_proof, p)`.
pub fn proof_of_work(last_proof: u64) -> u64 {
    (0..=u64::MAX)
        .find(|&proof| valid_proof(last_proof, proof))
        .expect("a proof exists well before the u64 range is exhausted")
}

/// Same search as [`proof_of_work`], checking `cancel` before each attempt.
/// Returns `None` once `cancel` is set.
pub fn proof_of_work_until(last_proof: u64, cancel: &AtomicBool) -> Option<u64> {
    (0..=u64::MAX)
        .take_while(|_| !cancel.load(Ordering::Relaxed))
        .find(|&proof| valid_proof(last_proof, proof))
}
