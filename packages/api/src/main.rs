use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use shared::repositories::challenge_repository::DynamoDbChallengeRepository;
use shared::repositories::game_session_repository::DynamoDbGameSessionRepository;
use shared::repositories::rating_recorder::DynamoDbRatingRecorder;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::auth_service::AuthService;
use shared::services::challenge_service::ChallengeService;
use shared::services::game_session_service::GameSessionService;
use shared::services::move_service::MoveService;
use shared::services::rules_engine::ChessRulesEngine;
use shared::services::termination_service::TerminationService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let session_repository = Arc::new(DynamoDbGameSessionRepository::new(client.clone()));
    let challenge_repository = Arc::new(DynamoDbChallengeRepository::new(client.clone()));
    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let rating_recorder = Arc::new(DynamoDbRatingRecorder::new(client.clone()));
    let rules_engine = Arc::new(ChessRulesEngine::new());

    let auth_service = Arc::new(AuthService::new());
    let challenge_service = Arc::new(ChallengeService::new(challenge_repository));
    let game_session_service = Arc::new(GameSessionService::new(
        session_repository.clone(),
        user_repository,
    ));
    let termination_service =
        TerminationService::new(session_repository.clone(), rating_recorder);
    let move_service = Arc::new(MoveService::new(
        session_repository,
        rules_engine,
        termination_service.clone(),
    ));

    let app_state = state::AppState {
        auth_service,
        challenge_service,
        game_session_service,
        move_service,
        termination_service: Arc::new(termination_service),
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::challenges::routes())
        .merge(routes::sessions::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
