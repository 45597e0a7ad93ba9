pub mod challenge;
pub mod completed_game;
pub mod game_session;
pub mod requests;
pub mod responses;
pub mod user;
