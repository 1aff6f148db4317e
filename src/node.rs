use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::{info, warn};
use parking_lot::Mutex;

use crate::blockchain::{Block, Ledger, proof_of_work_until};
use crate::error::{LedgerError, LedgerResult};
use crate::network::{ChainFetcher, ChainResponse, PeerRegistry, fetch_all, select_longest};
use crate::transaction::Transaction;

/// One ledger node: the chain, its pending pool and its peers behind one boundary.
///
/// Every method is a complete operation; callers never see the raw chain or
/// pool while they are being mutated.
pub struct Node {
    id: String,
    ledger: Mutex<Ledger>,
    peers: Mutex<PeerRegistry>,
    shutdown: Arc<AtomicBool>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_ledger(id, Ledger::new())
    }

    pub fn with_ledger(id: impl Into<String>, ledger: Ledger) -> Self {
        Self {
            id: id.into(),
            ledger: Mutex::new(ledger),
            peers: Mutex::new(PeerRegistry::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Flag that aborts any proof-of-work in flight once set.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn chain(&self) -> ChainResponse {
        ChainResponse::new(self.ledger.lock().chain().to_vec())
    }

    pub fn len(&self) -> usize {
        self.ledger.lock().len()
    }

    pub fn pending(&self) -> Vec<Transaction> {
        self.ledger.lock().pending().to_vec()
    }

    pub fn is_valid(&self) -> bool {
        self.ledger.lock().is_valid()
    }

    /// Queue a transaction; returns the index of the block expected to hold it.
    pub fn submit_transaction(&self, tx: Transaction) -> u64 {
        self.ledger.lock().new_transaction(tx)
    }

    /// Last proof and hash of the block the next proof must extend.
    pub fn mining_target(&self) -> (u64, String) {
        let ledger = self.ledger.lock();
        let last = ledger.last_block();
        (last.proof, last.hash())
    }

    /// Forge a block with `proof`, provided the chain still ends at `previous_hash`.
    ///
    /// The miner's reward entry is queued right before the block is minted.
    pub fn commit_block(&self, proof: u64, previous_hash: String) -> LedgerResult<Block> {
        let mut ledger = self.ledger.lock();
        if ledger.last_block().hash() != previous_hash {
            warn!("MINER - chain advanced under proof {proof}; discarding");
            return Err(LedgerError::StaleProof);
        }
        ledger.new_transaction(Transaction::reward(&self.id));
        let block = ledger.new_block(proof, Some(previous_hash)).clone();
        info!(
            "MINER - forged block #{} ({} txs, proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        Ok(block)
    }

    /// Run proof-of-work against the current last block and commit the result.
    ///
    /// Blocks the calling thread for the whole search.
    pub fn mine(&self) -> LedgerResult<Block> {
        let (last_proof, previous_hash) = self.mining_target();
        let proof =
            proof_of_work_until(last_proof, &self.shutdown).ok_or(LedgerError::MiningCancelled)?;
        self.commit_block(proof, previous_hash)
    }

    pub fn register_peers<S: AsRef<str>>(&self, addresses: &[S]) -> LedgerResult<Vec<String>> {
        let mut peers = self.peers.lock();
        let added = peers.register_peers(addresses)?;
        info!("PEERS - {added} new, {} total", peers.len());
        Ok(peers.peers())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().peers()
    }

    /// Consensus resolution: adopt the longest valid peer chain if it beats ours.
    ///
    /// Peers are queried without holding any lock; the swap itself happens
    /// under the ledger lock and re-checks the length at that moment.
    pub async fn resolve<F: ChainFetcher>(&self, fetcher: &F) -> bool {
        let peers = self.peers();
        let local_len = self.len();
        let responses = fetch_all(fetcher, &peers).await;

        match select_longest(local_len, responses) {
            Some(chain) => self.ledger.lock().replace_chain(chain),
            None => {
                info!("RESOLVE - local chain ({local_len}) is authoritative");
                false
            }
        }
    }
}
