use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Missing value: {0}")]
    MissingField(&'static str),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Please supply a valid list of nodes")]
    NoPeers,

    #[error("Invalid peer address: {0:?}")]
    InvalidPeerAddress(String),

    #[error("Peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("Peer {peer} answered with status {status}")]
    PeerStatus { peer: String, status: u16 },

    #[error("Peer {peer} sent an unusable chain: {reason}")]
    PeerPayload { peer: String, reason: String },

    #[error("Chain advanced while mining; proof is stale")]
    StaleProof,

    #[error("Mining cancelled")]
    MiningCancelled,

    #[error("Background task failed: {0}")]
    Worker(String),
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::MissingField(_)
            | LedgerError::MalformedBody(_)
            | LedgerError::NoPeers
            | LedgerError::InvalidPeerAddress(_) => StatusCode::BAD_REQUEST,
            LedgerError::StaleProof => StatusCode::CONFLICT,
            LedgerError::MiningCancelled => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::PeerUnreachable { .. }
            | LedgerError::PeerStatus { .. }
            | LedgerError::PeerPayload { .. } => StatusCode::BAD_GATEWAY,
            LedgerError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<actix_web::error::BlockingError> for LedgerError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        LedgerError::Worker(err.to_string())
    }
}
