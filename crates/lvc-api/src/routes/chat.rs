use axum::Json;
use axum::extract::State;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::analyze::{ChatReply, ChatRequest};
use crate::state::AppState;

/// Analyze the document named by `message`. Always answers 200.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    let request_id = Uuid::new_v4();
    let outcome = state
        .analyzer
        .analyze(&req.message)
        .instrument(info_span!("analyze", %request_id))
        .await;
    Json(outcome.into())
}
