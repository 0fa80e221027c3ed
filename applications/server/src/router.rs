/// HTTP router assembly
use crate::{api, config::ServerConfig, middleware, state::AppState};
use axum::{
    handler::HandlerWithoutStateExt,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// API routes live under `/api`. Everything else falls through to the
/// static front-end when one is configured, and to a plain-text 404.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let mut api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/exercise/new-user", post(api::users::create_user))
        .route("/exercise/users", get(api::users::list_users))
        .route("/exercise/add", post(api::exercises::add_exercise))
        .route("/exercise/log", get(api::exercises::get_log));

    if config.api.legacy_responses {
        api_routes = api_routes.layer(axum_middleware::map_response(
            middleware::legacy_responses,
        ));
    }

    let router = Router::new().nest("/api", api_routes);

    let router = match config.static_dir() {
        Some(dir) => {
            tracing::info!("Serving static files from {}", dir.display());
            router.fallback_service(
                ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .not_found_service(api::not_found.into_service()),
            )
        }
        None => router.fallback(api::not_found),
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
