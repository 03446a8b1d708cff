//! Views for partial re-render after an edit. Each is built from a fresh read
//! in its own session, never from the request that caused the change.

use super::player::{require_player, PlayerDto};
use super::reference::{list_refs, ClubDto, RefKind};
use crate::error::AppError;
use crate::infra::{session_scope, DbPool};
use serde::Serialize;

/// One roster row: name, club and teams, plus the clubs for the edit control.
#[derive(Debug, Serialize)]
pub struct PlayerRowView {
    pub player: PlayerDto,
    pub clubs: Vec<ClubDto>,
}

/// Just the club cell of one row.
#[derive(Debug, Serialize)]
pub struct PlayerClubCellView {
    pub player_id: i64,
    pub club: Option<ClubDto>,
    pub clubs: Vec<ClubDto>,
}

pub fn player_row_view(pool: &DbPool, player_id: i64) -> Result<PlayerRowView, AppError> {
    session_scope(pool, |tx| {
        let player = require_player(tx, player_id)?;
        let clubs = list_refs(tx, RefKind::Club)?;
        Ok(PlayerRowView { player, clubs })
    })
}

pub fn player_club_cell_view(
    pool: &DbPool,
    player_id: i64,
) -> Result<PlayerClubCellView, AppError> {
    session_scope(pool, |tx| {
        let player = require_player(tx, player_id)?;
        let clubs = list_refs(tx, RefKind::Club)?;
        Ok(PlayerClubCellView {
            player_id: player.id,
            club: player.club,
            clubs,
        })
    })
}
