use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::challenge_service::ChallengeService;
use shared::services::game_session_service::GameSessionService;
use shared::services::move_service::MoveService;
use shared::services::termination_service::TerminationService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub challenge_service: Arc<ChallengeService>,
    pub game_session_service: Arc<GameSessionService>,
    pub move_service: Arc<MoveService>,
    pub termination_service: Arc<TerminationService>,
}
