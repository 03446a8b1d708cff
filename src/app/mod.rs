//! Application use cases and transactions.

mod fragment;
mod player;
mod reference;
mod roster;
mod seed;

pub use fragment::{player_club_cell_view, player_row_view, PlayerClubCellView, PlayerRowView};
pub use player::{
    player_create, player_get, player_reassign_club, player_reassign_group, player_set_teams,
    PlayerClubReq, PlayerCreateReq, PlayerDto, PlayerGroupReq, PlayerTeamsReq,
};
pub use reference::{
    club_create, club_get, club_list, group_create, group_get, group_list, team_create, team_get,
    team_list, ClubDto, GroupDto, RefCreateReq, RefDto, TeamDto,
};
pub use roster::{roster_list, RosterDto};
pub use seed::{seed_demo_data, SeedResult};
