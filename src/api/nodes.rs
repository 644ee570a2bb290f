use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};

/// Register peer addresses (`host:port` or URLs).
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().body("Error: please supply a valid list of nodes");
    };

    if let Err(e) = state.node.register_peers(nodes.as_slice()) {
        warn!("POST /nodes/register - rejected: {e}");
        return HttpResponse::BadRequest().body(e.to_string());
    }

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: state.node.peers(),
    })
}

/// Consensus: adopt the longest valid chain among registered peers.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let resolution = match web::block(move || worker.node.resolve()).await {
        Ok(r) => r,
        Err(e) => {
            error!("GET /nodes/resolve - consensus worker failed: {e}");
            return HttpResponse::InternalServerError().body("consensus worker failed");
        }
    };

    let resp = if resolution.replaced {
        ResolveResponse {
            message: "Our chain was replaced".to_string(),
            new_chain: Some(resolution.chain),
            chain: None,
        }
    } else {
        ResolveResponse {
            message: "Our chain is authoritative".to_string(),
            new_chain: None,
            chain: Some(resolution.chain),
        }
    };
    HttpResponse::Ok().json(resp)
}
