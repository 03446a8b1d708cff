//! What an edit wants a player's club to become.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClubTarget {
    /// Link to a club that must already exist.
    Existing(i64),
    /// Link to the club with this exact name, creating it if missing.
    Create(String),
    /// Unlink the player from any club.
    Clear,
}

impl ClubTarget {
    /// Build a target from raw edit-form values.
    ///
    /// A non-blank `new_club` wins. Otherwise `club_id` is parsed as an id;
    /// a missing, blank or malformed id means "no club".
    pub fn from_form(club_id: Option<&str>, new_club: Option<&str>) -> Self {
        if let Some(name) = new_club.map(str::trim).filter(|s| !s.is_empty()) {
            return Self::Create(name.to_string());
        }
        match club_id.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::Clear,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Self::Existing(id),
                Err(_) => {
                    log::warn!("ignoring malformed club id {:?}, clearing club", raw);
                    Self::Clear
                }
            },
        }
    }
}
