//! Longest-valid-chain selection.
//!
//! Each peer's answer is judged on its own; an unreachable or lying peer only
//! removes itself from the comparison. The local chain wins ties.

use futures::future::join_all;
use log::{debug, warn};

use super::fetcher::{ChainFetcher, ChainResponse};
use crate::blockchain::ValidChain;
use crate::error::LedgerResult;

/// Query every peer concurrently and pair each answer with its peer.
pub async fn fetch_all<F: ChainFetcher>(
    fetcher: &F,
    peers: &[String],
) -> Vec<(String, LedgerResult<ChainResponse>)> {
    let requests = peers.iter().map(|peer| async move {
        let res = fetcher.fetch_chain(peer).await;
        (peer.clone(), res)
    });
    join_all(requests).await
}

/// Pick the longest valid chain strictly longer than `local_len`, if any.
pub fn select_longest(
    local_len: usize,
    responses: Vec<(String, LedgerResult<ChainResponse>)>,
) -> Option<ValidChain> {
    let mut max_length = local_len;
    let mut candidate = None;

    for (peer, res) in responses {
        let resp = match res {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RESOLVE - skipping {peer}: {e}");
                continue;
            }
        };

        if resp.length != resp.chain.len() {
            warn!(
                "RESOLVE - skipping {peer}: reports length {} but sent {} blocks",
                resp.length,
                resp.chain.len()
            );
            continue;
        }
        if resp.length <= max_length {
            debug!("RESOLVE - {peer} chain ({}) not longer than {max_length}", resp.length);
            continue;
        }
        let Some(chain) = ValidChain::check(resp.chain) else {
            warn!("RESOLVE - skipping {peer}: chain of {} blocks is invalid", resp.length);
            continue;
        };

        debug!("RESOLVE - {peer} offers a valid chain of {} blocks", chain.len());
        max_length = chain.len();
        candidate = Some(chain);
    }

    candidate
}
