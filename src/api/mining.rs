use std::time::Instant;

use actix_web::{HttpResponse, get, web};
use log::info;

use super::models::{AppState, MineResponse};
use crate::error::LedgerError;

/// Mine a block on top of the current chain:
/// - Proof-of-Work against the last block's proof (on the blocking pool)
/// - Reward entry for this node
/// - Mint the block from the pending pool, unless the chain moved meanwhile
#[get("/mine")]
pub async fn mine(state: web::Data<AppState>) -> Result<HttpResponse, LedgerError> {
    let t0 = Instant::now();
    let worker = state.clone();
    let block = web::block(move || worker.node.mine()).await??;

    info!(
        "GET /mine - block #{} sealed in {} ms",
        block.index,
        t0.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}
