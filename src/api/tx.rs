use actix_web::{HttpResponse, Responder, post, web};
use log::warn;

use super::models::{AppState, MessageResponse, NewTransactionRequest};

/// Queue a transaction for the next block. Only presence of the fields is
/// checked; their values are accepted as sent.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let NewTransactionRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (Some(sender), Some(recipient), Some(amount)) = (sender, recipient, amount) else {
        warn!("POST /transactions/new - rejected: missing values");
        return HttpResponse::BadRequest().body("missing values");
    };

    let index = state.node.submit_transaction(&sender, &recipient, amount);
    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    })
}
