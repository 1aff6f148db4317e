use std::sync::atomic::Ordering;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use proof_ledger::api::{self, AppState};
use proof_ledger::config::Settings;
use proof_ledger::node::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let node = Node::new(settings.node_id.clone());
    if !settings.peers.is_empty() {
        match node.register_peers(&settings.peers) {
            Ok(peers) => info!("seed peers: {}", peers.join(", ")),
            Err(e) => warn!("ignoring PEERS: {e}"),
        }
    }
    let shutdown = node.shutdown_handle();

    println!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        node.id(),
        settings.host,
        settings.port
    );

    let state = web::Data::new(AppState::new(node, settings.peer_timeout));

    let result = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await;

    // Let any proof-of-work still running on the blocking pool give up.
    shutdown.store(true, Ordering::Relaxed);
    result
}
