mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{JsonConfig, ServiceConfig};

use crate::error::LedgerError;
pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    // Undecodable bodies get the same `{error}` shape as validation failures.
    cfg.app_data(
        JsonConfig::default()
            .error_handler(|err, _req| LedgerError::MalformedBody(err.to_string()).into()),
    );

    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(mining::mine)
        .service(tx::new_transaction)
        .service(tx::get_pending)
        .service(nodes::register_nodes)
        .service(nodes::resolve);
}
