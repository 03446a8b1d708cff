//! Demo data loader.

use crate::error::AppError;
use crate::infra::{session_scope, DbPool};
use rusqlite::{params, Connection};
use serde::Serialize;

const GROUPS: &[&str] = &["Group 1", "Group 2"];
const CLUBS: &[&str] = &["Club 1", "Club 2"];
const TEAMS: &[&str] = &["Team 1", "Team 2"];
/// (player, group, club, teams)
const PLAYERS: &[(&str, &str, &str, &[&str])] = &[
    ("Player 1", "Group 1", "Club 1", &["Team 1"]),
    ("Player 2", "Group 1", "Club 1", &["Team 1"]),
    ("Player 3", "Group 2", "Club 2", &["Team 2"]),
    ("Player 4", "Group 2", "Club 2", &["Team 2"]),
];

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub groups: usize,
    pub clubs: usize,
    pub teams: usize,
    pub players: usize,
    pub skipped_duplicates: usize,
}

fn insert_named(conn: &Connection, table: &str, name: &str) -> Result<bool, AppError> {
    let sql = format!("INSERT INTO {} (name) VALUES (?1) ON CONFLICT(name) DO NOTHING", table);
    Ok(conn.execute(&sql, [name])? > 0)
}

fn id_by_name(conn: &Connection, table: &str, name: &str) -> Result<i64, AppError> {
    let sql = format!("SELECT id FROM {} WHERE name = ?1", table);
    Ok(conn.query_row(&sql, [name], |r| r.get(0))?)
}

/// Insert the demo roster. Rows whose name already exists are left untouched,
/// so running this against a populated database is harmless.
pub fn seed_demo_data(pool: &DbPool) -> Result<SeedResult, AppError> {
    let result = session_scope(pool, |tx| {
        let mut res = SeedResult::default();

        for (table, names, counter) in [
            ("groups", GROUPS, &mut res.groups),
            ("clubs", CLUBS, &mut res.clubs),
            ("teams", TEAMS, &mut res.teams),
        ] {
            for name in names {
                if insert_named(tx, table, name)? {
                    *counter += 1;
                } else {
                    res.skipped_duplicates += 1;
                }
            }
        }

        for (name, group, club, teams) in PLAYERS {
            let group_id = id_by_name(tx, "groups", group)?;
            let club_id = id_by_name(tx, "clubs", club)?;
            let inserted = tx.execute(
                "INSERT INTO players (name, group_id, club_id) VALUES (?1, ?2, ?3) ON CONFLICT(name) DO NOTHING",
                params![name, group_id, club_id],
            )?;
            if inserted == 0 {
                res.skipped_duplicates += 1;
                continue;
            }
            let player_id = tx.last_insert_rowid();
            for team in teams.iter() {
                let team_id = id_by_name(tx, "teams", team)?;
                tx.execute(
                    "INSERT OR IGNORE INTO player_team (player_id, team_id) VALUES (?1, ?2)",
                    params![player_id, team_id],
                )?;
            }
            res.players += 1;
        }

        Ok(res)
    })?;

    log::info!(
        "seeded {} groups, {} clubs, {} teams, {} players ({} already present)",
        result.groups,
        result.clubs,
        result.teams,
        result.players,
        result.skipped_duplicates
    );
    Ok(result)
}
