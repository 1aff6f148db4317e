use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::error::LedgerError;

/// Register peers for consensus resolution.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, LedgerError> {
    let nodes = body.into_inner().validate()?;
    let total_nodes = state.node.register_peers(&nodes).inspect_err(|e| {
        warn!("POST /nodes/register - rejected: {e}");
    })?;

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes,
    }))
}

/// Run consensus: adopt the longest valid chain among the registered peers.
#[get("/nodes/resolve")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    let replaced = state.node.resolve(&state.fetcher).await;
    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    info!("GET /nodes/resolve - {message}");

    HttpResponse::Ok().json(ResolveResponse {
        message,
        chain: state.node.chain().chain,
    })
}
