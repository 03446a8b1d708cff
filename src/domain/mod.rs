pub mod club_target;

pub use club_target::ClubTarget;
