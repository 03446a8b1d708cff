//! Player fragment endpoints. Every mutation commits first, then the response
//! is rendered from a fresh read of just the affected row or cell.

use super::{render, AppState};
use crate::app::{
    player_club_cell_view, player_reassign_club, player_row_view, player_set_teams,
    PlayerClubReq, PlayerTeamsReq,
};
use crate::domain::ClubTarget;
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, put};
use axum::{Form, Router};
use serde::Deserialize;

/// Club edit form
#[derive(Debug, Deserialize)]
pub struct ClubForm {
    pub club_id: Option<String>,
    pub new_club: Option<String>,
}

/// GET /players/{id}/row
async fn row(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let view = state.run(move |pool| player_row_view(pool, id)).await?;
    Ok(Html(render::row_fragment(&view)))
}

/// GET /players/{id}/club
async fn club_cell(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let view = state.run(move |pool| player_club_cell_view(pool, id)).await?;
    Ok(Html(render::club_cell_fragment(&view)))
}

/// GET /players/{id}/club/edit
async fn club_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let view = state.run(move |pool| player_club_cell_view(pool, id)).await?;
    Ok(Html(render::club_edit_fragment(&view)))
}

/// PUT /players/{id}/club - reassign, then re-render the club cell
async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ClubForm>,
) -> Result<Html<String>, AppError> {
    let target = ClubTarget::from_form(form.club_id.as_deref(), form.new_club.as_deref());
    let view = state
        .run(move |pool| {
            player_reassign_club(
                pool,
                PlayerClubReq {
                    player_id: id,
                    club: target,
                },
            )?;
            player_club_cell_view(pool, id)
        })
        .await?;
    Ok(Html(render::club_cell_fragment(&view)))
}

fn team_ids_from_form(pairs: &[(String, String)]) -> Result<Vec<i64>, AppError> {
    pairs
        .iter()
        .filter(|(k, _)| k == "team_id")
        .map(|(_, v)| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| AppError::Validation(format!("invalid team id {:?}", v)))
        })
        .collect()
}

/// PUT /players/{id}/teams - replace the team set, then re-render the row
async fn update_teams(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let team_ids = team_ids_from_form(&pairs)?;
    let view = state
        .run(move |pool| {
            player_set_teams(
                pool,
                PlayerTeamsReq {
                    player_id: id,
                    team_ids,
                },
            )?;
            player_row_view(pool, id)
        })
        .await?;
    Ok(Html(render::row_fragment(&view)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/players/{id}/row", get(row))
        .route("/players/{id}/club", get(club_cell).put(update_club))
        .route("/players/{id}/club/edit", get(club_edit))
        .route("/players/{id}/teams", put(update_teams))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_repeated_team_ids() {
        let pairs = vec![
            ("team_id".to_string(), "3".to_string()),
            ("other".to_string(), "x".to_string()),
            ("team_id".to_string(), " 5 ".to_string()),
        ];
        assert_eq!(team_ids_from_form(&pairs).unwrap(), vec![3, 5]);
    }

    #[test]
    fn rejects_malformed_team_id() {
        let pairs = vec![("team_id".to_string(), "five".to_string())];
        let err = team_ids_from_form(&pairs).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
