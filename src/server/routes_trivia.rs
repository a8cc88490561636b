use crate::server::AppContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

pub fn trivia_routes() -> Router<AppContext> {
    Router::new().route("/trivia", get(daily_trivia))
}

/// Today's trivia, or 204 when none could be produced yet.
async fn daily_trivia(State(ctx): State<AppContext>) -> Response {
    match ctx.trivia.get().await {
        Some(trivia) => Json(trivia).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
