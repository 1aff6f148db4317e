use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};

/// Get the full chain and its length.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.chain())
}

/// Validate this node's own chain.
#[get("/chain/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.node.is_valid(),
        length: state.node.len(),
    })
}
