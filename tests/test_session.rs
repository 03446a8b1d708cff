//! Unit-of-work boundary tests

use roster_lib::app::{club_list, player_create, player_get, PlayerCreateReq};
use roster_lib::error::AppError;
use roster_lib::infra::db::init_test_db;
use roster_lib::infra::session_scope;

#[test]
fn failure_after_club_insert_rolls_the_club_back() {
    let pool = init_test_db();
    let p = player_create(
        &pool,
        PlayerCreateReq {
            name: "P".to_string(),
            club_id: None,
            group_id: None,
            team_ids: vec![],
        },
    )
    .unwrap();

    let res: Result<(), AppError> = session_scope(&pool, |tx| {
        tx.execute("INSERT INTO clubs (name) VALUES ('Half Made')", [])?;
        // Dangling club id: the foreign key rejects the player update.
        tx.execute("UPDATE players SET club_id = 999999 WHERE id = ?1", [p.id])?;
        Ok(())
    });

    assert_eq!(res.unwrap_err().code(), "DB_ERROR");
    assert!(club_list(&pool).unwrap().is_empty());
    assert!(player_get(&pool, p.id).unwrap().club_id.is_none());
}

#[test]
fn reads_see_earlier_writes_in_the_same_session() {
    let pool = init_test_db();
    let seen: i64 = session_scope(&pool, |tx| {
        tx.execute("INSERT INTO clubs (name) VALUES ('Visible')", [])?;
        let id = tx.last_insert_rowid();
        Ok(tx.query_row("SELECT id FROM clubs WHERE name = 'Visible'", [], |r| r.get::<_, i64>(0))? - id)
    })
    .unwrap();
    assert_eq!(seen, 0);
}

#[test]
fn pool_is_usable_after_a_failed_session() {
    let pool = init_test_db();
    let _ = session_scope(&pool, |_tx| -> Result<(), AppError> {
        Err(AppError::NotFound("player 1".into()))
    });
    let n = session_scope(&pool, |tx| {
        Ok(tx.query_row("SELECT COUNT(*) FROM players", [], |r| r.get::<_, i64>(0))?)
    })
    .unwrap();
    assert_eq!(n, 0);
}
