//! Club, group and team use cases. All three are plain `{id, name}` rows with a
//! unique name, so they share one implementation keyed by `RefKind`.

use crate::error::AppError;
use crate::infra::{session_scope, DbPool};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Club,
    Group,
    Team,
}

impl RefKind {
    fn table(self) -> &'static str {
        match self {
            Self::Club => "clubs",
            Self::Group => "groups",
            Self::Team => "teams",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Club => "club",
            Self::Group => "group",
            Self::Team => "team",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefDto {
    pub id: i64,
    pub name: String,
}

pub type ClubDto = RefDto;
pub type GroupDto = RefDto;
pub type TeamDto = RefDto;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefCreateReq {
    pub name: String,
}

pub(crate) fn list_refs(conn: &Connection, kind: RefKind) -> Result<Vec<RefDto>, AppError> {
    let sql = format!("SELECT id, name FROM {} ORDER BY name, id", kind.table());
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(RefDto {
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

pub(crate) fn find_ref(
    conn: &Connection,
    kind: RefKind,
    id: i64,
) -> Result<Option<RefDto>, AppError> {
    let sql = format!("SELECT id, name FROM {} WHERE id = ?1", kind.table());
    let found = conn
        .query_row(&sql, [id], |r| {
            Ok(RefDto {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })
        .optional()?;
    Ok(found)
}

/// Like `find_ref`, but a missing row is `NotFound`.
pub(crate) fn require_ref(conn: &Connection, kind: RefKind, id: i64) -> Result<RefDto, AppError> {
    find_ref(conn, kind, id)?.ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))
}

fn valid_name(kind: RefKind, name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(format!("{} name is required", kind.label())));
    }
    Ok(name.to_string())
}

pub(crate) fn insert_ref(conn: &Connection, kind: RefKind, name: &str) -> Result<RefDto, AppError> {
    let name = valid_name(kind, name)?;
    let sql = format!("INSERT INTO {} (name) VALUES (?1)", kind.table());
    conn.execute(&sql, params![&name])
        .map_err(|e| AppError::from_insert(e, format!("{} {:?}", kind.label(), name)))?;
    Ok(RefDto {
        id: conn.last_insert_rowid(),
        name,
    })
}

/// Resolve a club by exact (case-sensitive) name, creating it when missing.
///
/// The insert is a no-op when the name is already taken, so two writers racing
/// on the same new name both end up with the one surviving row.
pub(crate) fn ensure_club_named(conn: &Connection, name: &str) -> Result<ClubDto, AppError> {
    let name = valid_name(RefKind::Club, name)?;
    let inserted = conn.execute(
        "INSERT INTO clubs (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        params![&name],
    )?;
    let id: i64 = conn.query_row("SELECT id FROM clubs WHERE name = ?1", params![&name], |r| {
        r.get(0)
    })?;
    if inserted > 0 {
        log::info!("created club {:?} (id {}) on demand", name, id);
    }
    Ok(ClubDto { id, name })
}

fn ref_create(pool: &DbPool, kind: RefKind, req: RefCreateReq) -> Result<RefDto, AppError> {
    let created = session_scope(pool, |tx| insert_ref(tx, kind, &req.name))?;
    log::info!("created {} {:?} (id {})", kind.label(), created.name, created.id);
    Ok(created)
}

fn ref_get(pool: &DbPool, kind: RefKind, id: i64) -> Result<RefDto, AppError> {
    session_scope(pool, |tx| require_ref(tx, kind, id))
}

fn ref_list(pool: &DbPool, kind: RefKind) -> Result<Vec<RefDto>, AppError> {
    session_scope(pool, |tx| list_refs(tx, kind))
}

pub fn club_create(pool: &DbPool, req: RefCreateReq) -> Result<ClubDto, AppError> {
    ref_create(pool, RefKind::Club, req)
}

pub fn club_get(pool: &DbPool, id: i64) -> Result<ClubDto, AppError> {
    ref_get(pool, RefKind::Club, id)
}

pub fn club_list(pool: &DbPool) -> Result<Vec<ClubDto>, AppError> {
    ref_list(pool, RefKind::Club)
}

pub fn group_create(pool: &DbPool, req: RefCreateReq) -> Result<GroupDto, AppError> {
    ref_create(pool, RefKind::Group, req)
}

pub fn group_get(pool: &DbPool, id: i64) -> Result<GroupDto, AppError> {
    ref_get(pool, RefKind::Group, id)
}

pub fn group_list(pool: &DbPool) -> Result<Vec<GroupDto>, AppError> {
    ref_list(pool, RefKind::Group)
}

pub fn team_create(pool: &DbPool, req: RefCreateReq) -> Result<TeamDto, AppError> {
    ref_create(pool, RefKind::Team, req)
}

pub fn team_get(pool: &DbPool, id: i64) -> Result<TeamDto, AppError> {
    ref_get(pool, RefKind::Team, id)
}

pub fn team_list(pool: &DbPool) -> Result<Vec<TeamDto>, AppError> {
    ref_list(pool, RefKind::Team)
}
