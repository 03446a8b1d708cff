//! Roster listing: every player with its relations, plus the reference lists
//! used to populate selection controls.

use super::player::{PlayerDto, PLAYER_SELECT};
use super::reference::{list_refs, ClubDto, GroupDto, RefKind, TeamDto};
use crate::error::AppError;
use crate::infra::{session_scope, DbPool};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct RosterDto {
    pub players: Vec<PlayerDto>,
    pub clubs: Vec<ClubDto>,
    pub teams: Vec<TeamDto>,
    pub groups: Vec<GroupDto>,
}

/// All team memberships in one statement, grouped by player.
fn memberships(conn: &Connection) -> Result<HashMap<i64, Vec<TeamDto>>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT pt.player_id, t.id, t.name FROM player_team pt JOIN teams t ON t.id = pt.team_id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            TeamDto {
                id: r.get(1)?,
                name: r.get(2)?,
            },
        ))
    })?;
    let mut by_player: HashMap<i64, Vec<TeamDto>> = HashMap::new();
    for r in rows {
        let (player_id, team) = r?;
        by_player.entry(player_id).or_default().push(team);
    }
    Ok(by_player)
}

pub(crate) fn load_roster(conn: &Connection) -> Result<RosterDto, AppError> {
    let sql = format!("{} ORDER BY p.name, p.id", PLAYER_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], PlayerDto::from_row)?;
    let mut players = Vec::new();
    for r in rows {
        players.push(r?);
    }

    let mut teams_by_player = memberships(conn)?;
    for p in &mut players {
        p.set_teams(teams_by_player.remove(&p.id).unwrap_or_default());
    }

    Ok(RosterDto {
        players,
        clubs: list_refs(conn, RefKind::Club)?,
        teams: list_refs(conn, RefKind::Team)?,
        groups: list_refs(conn, RefKind::Group)?,
    })
}

/// Snapshot of the whole roster taken inside a single transaction.
pub fn roster_list(pool: &DbPool) -> Result<RosterDto, AppError> {
    session_scope(pool, |tx| load_roster(tx))
}
