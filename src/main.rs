mod api;
mod blockchain;
mod config;
mod error;
mod node;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use blockchain::Ledger;
use config::NodeConfig;
use node::{HttpChainFetcher, MiningSettings, Node};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = NodeConfig::from_env();

    println!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        cfg.node_id, cfg.host, cfg.port
    );

    let fetcher = HttpChainFetcher::new(cfg.peer_timeout, cfg.peer_retries, cfg.peer_retry_backoff);
    let node = Node::new(
        cfg.node_id.clone(),
        Ledger::new(cfg.genesis_proof),
        Box::new(fetcher),
        MiningSettings {
            reward: cfg.mining_reward,
            max_iterations: cfg.pow_max_iterations,
        },
    );
    info!("NODE - {} ready (genesis proof {})", node.identifier(), cfg.genesis_proof);

    let state = web::Data::new(AppState::new(node));
    let server_state = state.clone();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await;

    // Unblock any proof search still running on the blocking pool.
    state.node.cancel_mining();
    result
}
