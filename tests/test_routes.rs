//! HTTP layer tests: routing, fragments, status mapping

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use roster_lib::app::{club_list, player_get, seed_demo_data};
use roster_lib::infra::db::init_test_db;
use roster_lib::routes::{build_router, AppState};
use std::path::Path;
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let pool = init_test_db();
    seed_demo_data(&pool).unwrap();
    let state = AppState::new(pool);
    (build_router(state.clone(), Path::new("static")), state)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn player_id(state: &AppState, name: &str) -> i64 {
    roster_lib::app::roster_list(state.pool())
        .unwrap()
        .players
        .into_iter()
        .find(|p| p.name == name)
        .unwrap()
        .id
}

#[tokio::test]
async fn pages_render() {
    let (app, _) = app();
    let (status, body) = send(app.clone(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Roster</h1>"));

    let (status, body) = send(app.clone(), get("/about")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("About"));

    let (status, body) = send(app, get("/players")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Player 3"));
    assert!(body.contains("Club 2"));
    assert!(body.contains("htmx"));
}

#[tokio::test]
async fn roster_json_has_players_and_reference_lists() {
    let (app, _) = app();
    let (status, body) = send(app, get("/api/roster")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["players"].as_array().unwrap().len(), 4);
    assert_eq!(json["clubs"].as_array().unwrap().len(), 2);
    assert_eq!(json["teams"].as_array().unwrap().len(), 2);
    assert_eq!(json["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn row_and_cell_fragments() {
    let (app, state) = app();
    let id = player_id(&state, "Player 1");

    let (status, body) = send(app.clone(), get(&format!("/players/{}/row", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(&format!("<tr id=\"player-{}\">", id)));
    assert!(body.contains("Team 1"));
    assert!(!body.contains("<html"));

    let (status, body) = send(app.clone(), get(&format!("/players/{}/club", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(&format!("<td id=\"player-{}-club\"", id)));
    assert!(body.contains("Club 1"));

    let (status, body) = send(app, get(&format!("/players/{}/club/edit", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<select name=\"club_id\">"));
    assert!(body.contains("name=\"new_club\""));
}

#[tokio::test]
async fn put_club_with_new_name_creates_once_and_returns_cell() {
    let (app, state) = app();
    let id = player_id(&state, "Player 2");

    for _ in 0..2 {
        let (status, body) =
            send(app.clone(), put_form(&format!("/players/{}/club", id), "club_id=&new_club=Acme")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(&format!("<td id=\"player-{}-club\"", id)));
        assert!(body.contains("Acme"));
    }

    let clubs = club_list(state.pool()).unwrap();
    assert_eq!(clubs.iter().filter(|c| c.name == "Acme").count(), 1);
    assert_eq!(player_get(state.pool(), id).unwrap().club.unwrap().name, "Acme");
}

#[tokio::test]
async fn put_club_with_existing_id_and_with_garbage() {
    let (app, state) = app();
    let id = player_id(&state, "Player 1");
    let club2 = club_list(state.pool())
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Club 2")
        .unwrap();

    let (status, _) = send(
        app.clone(),
        put_form(&format!("/players/{}/club", id), &format!("club_id={}", club2.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player_get(state.pool(), id).unwrap().club_id, Some(club2.id));

    let (status, body) = send(app, put_form(&format!("/players/{}/club", id), "club_id=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("no club"));
    assert!(player_get(state.pool(), id).unwrap().club_id.is_none());
}

#[tokio::test]
async fn put_club_for_missing_player_is_404_and_creates_nothing() {
    let (app, state) = app();
    let (status, body) = send(app, put_form("/players/9999/club", "new_club=Ghosts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(club_list(state.pool()).unwrap().iter().all(|c| c.name != "Ghosts"));
}

#[tokio::test]
async fn put_teams_returns_updated_row() {
    let (app, state) = app();
    let id = player_id(&state, "Player 1");
    let team_ids: Vec<i64> = roster_lib::app::team_list(state.pool())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    let form = team_ids
        .iter()
        .map(|t| format!("team_id={}", t))
        .collect::<Vec<_>>()
        .join("&");

    let (status, body) = send(app.clone(), put_form(&format!("/players/{}/teams", id), &form)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Team 1, Team 2"));
    assert_eq!(player_get(state.pool(), id).unwrap().team_ids.len(), 2);

    let (status, _) = send(app, put_form(&format!("/players/{}/teams", id), "team_id=x")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(player_get(state.pool(), id).unwrap().team_ids.len(), 2);
}

#[tokio::test]
async fn unknown_player_fragment_is_404() {
    let (app, _) = app();
    let (status, _) = send(app, get("/players/777/row")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
