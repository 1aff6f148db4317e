use log::{debug, info, warn};

use super::Block;
use super::pow::valid_proof;
use crate::transaction::Transaction;

/// A chain that has passed [`Ledger::valid_chain`]; only constructible through it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidChain(Vec<Block>);

impl ValidChain {
    pub fn check(chain: Vec<Block>) -> Option<Self> {
        Ledger::valid_chain(&chain).then_some(Self(chain))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.chain.push(Block::genesis());
        ledger
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn new_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Mint a block from the whole pending pool and append it.
    ///
    /// `previous_hash` defaults to the hash of the current last block.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);

        let block = Block::new(index, transactions, proof, previous_hash);
        debug!(
            "LEDGER - block #{} minted with {} txs (proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Check linkage and proofs of `chain`, from the second block on.
    pub fn valid_chain(chain: &[Block]) -> bool {
        for pair in chain.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);

            if current.previous_hash != prev.hash() {
                debug!("chain rejected: block #{} breaks hash linkage", current.index);
                return false;
            }
            if !valid_proof(prev.proof, current.proof) {
                debug!("chain rejected: block #{} has an invalid proof", current.index);
                return false;
            }
        }
        true
    }

    /// Validate this ledger's own chain.
    pub fn is_valid(&self) -> bool {
        Self::valid_chain(&self.chain)
    }

    /// Swap in `candidate` if it is still strictly longer than the current chain.
    ///
    /// Validity was established when `candidate` was built, so this only
    /// compares lengths.
    pub fn replace_chain(&mut self, candidate: ValidChain) -> bool {
        if candidate.len() <= self.chain.len() {
            warn!(
                "LEDGER - candidate chain ({}) no longer beats local chain ({})",
                candidate.len(),
                self.chain.len()
            );
            return false;
        }
        info!(
            "LEDGER - chain replaced: {} -> {} blocks",
            self.chain.len(),
            candidate.len()
        );
        self.chain = candidate.0;
        true
    }
}
