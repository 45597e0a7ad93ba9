pub mod auth_service_errors;
pub mod challenge_service_errors;
pub mod game_session_service_errors;
pub mod rules_engine_errors;
