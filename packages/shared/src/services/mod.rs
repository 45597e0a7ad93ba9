pub mod auth_service;
pub mod challenge_service;
pub mod clock;
pub mod errors;
pub mod game_session_service;
pub mod move_service;
pub mod rules_engine;
pub mod termination_service;
