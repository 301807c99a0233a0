use std::sync::Arc;

use axum::Router;
use db::DBService;
use services::services::{
    coaching::CoachingService, completion::CompletionService, dashboard::DashboardService,
    task_generator::TaskGenerator,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use auth::JwtVerifier;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub coaching: CoachingService,
    pub dashboard: DashboardService,
    pub auth: Arc<JwtVerifier>,
    pub live_model: bool,
}

impl AppState {
    pub fn new(
        db: DBService,
        completion: Option<Arc<dyn CompletionService>>,
        auth: JwtVerifier,
    ) -> Self {
        let store = Arc::new(db.clone());
        let generator = TaskGenerator::new(completion);
        let live_model = generator.has_live_model();

        Self {
            coaching: CoachingService::new(store.clone(), store.clone(), generator),
            dashboard: DashboardService::new(store.clone(), store.clone(), store),
            db,
            auth: Arc::new(auth),
            live_model,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::health::router(&state))
        .merge(routes::assessment::router(&state))
        .merge(routes::tasks::router(&state))
        .merge(routes::profile::router(&state))
        .merge(routes::dashboard::router(&state));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
