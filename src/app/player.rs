//! Player use cases: create, get, club/group/team reassignment.

use super::reference::{
    ensure_club_named, require_ref, ClubDto, GroupDto, RefDto, RefKind, TeamDto,
};
use crate::domain::ClubTarget;
use crate::error::AppError;
use crate::infra::{session_scope, DbPool};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Players with club and group resolved in the same statement.
pub(crate) const PLAYER_SELECT: &str = "SELECT p.id, p.name, p.club_id, c.name, p.group_id, g.name \
     FROM players p \
     LEFT JOIN clubs c ON c.id = p.club_id \
     LEFT JOIN groups g ON g.id = p.group_id";

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub id: i64,
    pub name: String,
    pub club_id: Option<i64>,
    pub group_id: Option<i64>,
    pub team_ids: Vec<i64>,
    pub club: Option<ClubDto>,
    pub group: Option<GroupDto>,
    pub teams: Vec<TeamDto>,
}

impl PlayerDto {
    /// Row mapper for `PLAYER_SELECT`; teams are attached by the caller.
    pub(crate) fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        let club = resolved(r.get(2)?, r.get(3)?);
        let group = resolved(r.get(4)?, r.get(5)?);
        Ok(PlayerDto {
            id: r.get(0)?,
            name: r.get(1)?,
            club_id: club.as_ref().map(|c| c.id),
            group_id: group.as_ref().map(|g| g.id),
            team_ids: Vec::new(),
            club,
            group,
            teams: Vec::new(),
        })
    }

    pub(crate) fn set_teams(&mut self, mut teams: Vec<TeamDto>) {
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        self.team_ids = teams.iter().map(|t| t.id).collect();
        self.teams = teams;
    }
}

fn resolved(id: Option<i64>, name: Option<String>) -> Option<RefDto> {
    match (id, name) {
        (Some(id), Some(name)) => Some(RefDto { id, name }),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCreateReq {
    pub name: String,
    pub club_id: Option<i64>,
    pub group_id: Option<i64>,
    #[serde(default)]
    pub team_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClubReq {
    pub player_id: i64,
    pub club: ClubTarget,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGroupReq {
    pub player_id: i64,
    pub group_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeamsReq {
    pub player_id: i64,
    pub team_ids: Vec<i64>,
}

fn load_teams(conn: &Connection, player_id: i64) -> Result<Vec<TeamDto>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name FROM player_team pt JOIN teams t ON t.id = pt.team_id WHERE pt.player_id = ?1",
    )?;
    let rows = stmt.query_map([player_id], |r| {
        Ok(TeamDto {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// In-session lookup with club, group and teams resolved.
pub(crate) fn find_player(conn: &Connection, id: i64) -> Result<Option<PlayerDto>, AppError> {
    let sql = format!("{} WHERE p.id = ?1", PLAYER_SELECT);
    let player = conn.query_row(&sql, [id], PlayerDto::from_row).optional()?;
    match player {
        None => Ok(None),
        Some(mut p) => {
            p.set_teams(load_teams(conn, id)?);
            Ok(Some(p))
        }
    }
}

pub(crate) fn require_player(conn: &Connection, id: i64) -> Result<PlayerDto, AppError> {
    find_player(conn, id)?.ok_or_else(|| AppError::NotFound(format!("player {}", id)))
}

fn validated_teams(conn: &Connection, team_ids: &[i64]) -> Result<BTreeSet<i64>, AppError> {
    let unique: BTreeSet<i64> = team_ids.iter().copied().collect();
    for id in &unique {
        require_ref(conn, RefKind::Team, *id)?;
    }
    Ok(unique)
}

fn write_teams(conn: &Connection, player_id: i64, team_ids: &BTreeSet<i64>) -> Result<(), AppError> {
    conn.execute("DELETE FROM player_team WHERE player_id = ?1", [player_id])?;
    for team_id in team_ids {
        conn.execute(
            "INSERT INTO player_team (player_id, team_id) VALUES (?1, ?2)",
            params![player_id, team_id],
        )?;
    }
    Ok(())
}

pub fn player_create(pool: &DbPool, req: PlayerCreateReq) -> Result<PlayerDto, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("player name is required".into()));
    }

    let player = session_scope(pool, |tx| {
        if let Some(club_id) = req.club_id {
            require_ref(tx, RefKind::Club, club_id)?;
        }
        if let Some(group_id) = req.group_id {
            require_ref(tx, RefKind::Group, group_id)?;
        }
        let teams = validated_teams(tx, &req.team_ids)?;

        tx.execute(
            "INSERT INTO players (name, club_id, group_id) VALUES (?1, ?2, ?3)",
            params![&name, req.club_id, req.group_id],
        )
        .map_err(|e| AppError::from_insert(e, format!("player {:?}", name)))?;
        let id = tx.last_insert_rowid();
        write_teams(tx, id, &teams)?;

        require_player(tx, id)
    })?;

    log::info!("created player {:?} (id {})", player.name, player.id);
    Ok(player)
}

pub fn player_get(pool: &DbPool, id: i64) -> Result<PlayerDto, AppError> {
    session_scope(pool, |tx| require_player(tx, id))
}

/// Point a player at a club, or at none.
///
/// The player is checked before anything is written, so an unknown player never
/// leaves a freshly created club behind. Returns the committed club id.
pub fn player_reassign_club(pool: &DbPool, req: PlayerClubReq) -> Result<Option<i64>, AppError> {
    let club_id = session_scope(pool, |tx| {
        require_player(tx, req.player_id)?;

        let club_id = match &req.club {
            ClubTarget::Existing(id) => Some(require_ref(tx, RefKind::Club, *id)?.id),
            ClubTarget::Create(name) => Some(ensure_club_named(tx, name)?.id),
            ClubTarget::Clear => None,
        };

        tx.execute(
            "UPDATE players SET club_id = ?1 WHERE id = ?2",
            params![club_id, req.player_id],
        )?;
        Ok(club_id)
    })?;

    log::info!("player {} club set to {:?}", req.player_id, club_id);
    Ok(club_id)
}

pub fn player_reassign_group(pool: &DbPool, req: PlayerGroupReq) -> Result<Option<i64>, AppError> {
    session_scope(pool, |tx| {
        require_player(tx, req.player_id)?;
        if let Some(group_id) = req.group_id {
            require_ref(tx, RefKind::Group, group_id)?;
        }
        tx.execute(
            "UPDATE players SET group_id = ?1 WHERE id = ?2",
            params![req.group_id, req.player_id],
        )?;
        Ok(req.group_id)
    })
}

/// Replace a player's team set. Duplicate ids collapse; any unknown team
/// aborts the whole change.
pub fn player_set_teams(pool: &DbPool, req: PlayerTeamsReq) -> Result<Vec<i64>, AppError> {
    let teams = session_scope(pool, |tx| {
        require_player(tx, req.player_id)?;
        let teams = validated_teams(tx, &req.team_ids)?;
        write_teams(tx, req.player_id, &teams)?;
        Ok(teams)
    })?;

    log::info!("player {} teams set to {:?}", req.player_id, teams);
    Ok(teams.into_iter().collect())
}
