use actix_web::{HttpResponse, Responder, get, web};
use log::{error, warn};

use super::models::{AppState, MineResponse};

/// Get the full chain. This is also what peers fetch during consensus.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.get_chain())
}

/// Mine a block: proof search runs on the blocking pool, then the reward
/// transaction and pending pool are sealed into the new block.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    match web::block(move || worker.node.mine()).await {
        Ok(Ok(block)) => HttpResponse::Ok().json(MineResponse {
            message: "New Block Forged".to_string(),
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }),
        Ok(Err(e)) => {
            warn!("GET /mine - no block: {e}");
            HttpResponse::ServiceUnavailable().body(e.to_string())
        }
        Err(e) => {
            error!("GET /mine - mining worker failed: {e}");
            HttpResponse::InternalServerError().body("mining worker failed")
        }
    }
}
