//! Full pages and the JSON roster.

use super::{render, AppState};
use crate::app::{roster_list, RosterDto};
use crate::error::AppError;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};

/// GET / - home page
async fn index() -> Html<String> {
    Html(render::index_page())
}

/// GET /about - background on the app
async fn about() -> Html<String> {
    Html(render::about_page())
}

/// GET /players - the whole roster as a table
async fn players(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let roster = state.run(roster_list).await?;
    Ok(Html(render::players_page(&roster)))
}

/// GET /api/roster - the same snapshot as structured data
async fn roster_json(State(state): State<AppState>) -> Result<Json<RosterDto>, AppError> {
    Ok(Json(state.run(roster_list).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/players", get(players))
        .route("/api/roster", get(roster_json))
}
