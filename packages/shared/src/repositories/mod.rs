pub mod challenge_repository;
pub mod errors;
pub mod game_session_repository;
pub mod rating_recorder;
pub mod user_repository;

#[cfg(test)]
pub mod in_memory;
