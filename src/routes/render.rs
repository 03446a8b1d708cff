//! HTML for full pages and the row/cell fragments swapped in by htmx.

use crate::app::{ClubDto, PlayerClubCellView, PlayerDto, PlayerRowView, RosterDto};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/css/main.css\">\n\
         <script src=\"{HTMX_SRC}\"></script>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> <a href=\"/players\">Players</a> <a href=\"/about\">About</a></nav>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn index_page() -> String {
    page(
        "Roster",
        "<h1>Roster</h1>\n<p>Players, teams, clubs and groups. Open the <a href=\"/players\">player list</a> to edit club assignments.</p>",
    )
}

pub fn about_page() -> String {
    page(
        "About",
        "<h1>About</h1>\n<p>A small roster manager. Click a club cell to change it; the row updates in place.</p>",
    )
}

pub fn players_page(roster: &RosterDto) -> String {
    let mut body = String::from(
        "<h1>Players</h1>\n<table id=\"players\">\n<thead><tr><th>Name</th><th>Club</th><th>Teams</th></tr></thead>\n<tbody>\n",
    );
    for p in &roster.players {
        body.push_str(&player_row(p));
        body.push('\n');
    }
    body.push_str("</tbody>\n</table>");
    page("Players", &body)
}

fn player_row(player: &PlayerDto) -> String {
    let teams: Vec<String> = player.teams.iter().map(|t| escape(&t.name)).collect();
    format!(
        "<tr id=\"player-{id}\"><td>{name}</td>{club}<td>{teams}</td></tr>",
        id = player.id,
        name = escape(&player.name),
        club = club_cell_html(player.id, player.club.as_ref()),
        teams = teams.join(", "),
    )
}

pub fn row_fragment(view: &PlayerRowView) -> String {
    player_row(&view.player)
}

fn club_cell_html(player_id: i64, club: Option<&ClubDto>) -> String {
    let label = club.map_or_else(|| "<em>no club</em>".to_string(), |c| escape(&c.name));
    format!(
        "<td id=\"player-{player_id}-club\" hx-get=\"/players/{player_id}/club/edit\" hx-trigger=\"click\" hx-swap=\"outerHTML\">{label}</td>"
    )
}

pub fn club_cell_fragment(view: &PlayerClubCellView) -> String {
    club_cell_html(view.player_id, view.club.as_ref())
}

pub fn club_edit_fragment(view: &PlayerClubCellView) -> String {
    let pid = view.player_id;
    let current = view.club.as_ref().map(|c| c.id);
    let mut options = String::from("<option value=\"\">(no club)</option>");
    for club in &view.clubs {
        let selected = if Some(club.id) == current { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            club.id,
            selected,
            escape(&club.name)
        ));
    }
    format!(
        "<td id=\"player-{pid}-club\">\
         <form hx-put=\"/players/{pid}/club\" hx-target=\"#player-{pid}-club\" hx-swap=\"outerHTML\">\
         <select name=\"club_id\">{options}</select>\
         <input type=\"text\" name=\"new_club\" placeholder=\"or new club\">\
         <button type=\"submit\">Save</button>\
         <button type=\"button\" hx-get=\"/players/{pid}/club\" hx-target=\"#player-{pid}-club\" hx-swap=\"outerHTML\">Cancel</button>\
         </form></td>"
    )
}
