use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, MessageResponse, NewTransactionRequest, PendingResponse};
use crate::error::LedgerError;

/// Queue a transaction for the next mined block.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> Result<HttpResponse, LedgerError> {
    let tx = body.into_inner().validate().inspect_err(|e| {
        warn!("POST /transactions/new - rejected: {e}");
    })?;
    debug!(
        "POST /transactions/new - {} -> {} ({})",
        tx.sender, tx.recipient, tx.amount
    );

    let index = state.node.submit_transaction(tx);
    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    }))
}

/// List transactions waiting for the next block.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.node.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
