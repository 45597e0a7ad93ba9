pub mod challenge_repository_errors;
pub mod game_session_repository_errors;
pub mod rating_recorder_errors;
pub mod user_repository_errors;
