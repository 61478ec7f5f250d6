mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::assistant::Assistant;
use crate::store::Store;

pub use handlers::{
    ApiError, CHAT_UPSTREAM_FAILED, MISSING_CHAT_FIELDS, NO_ROLE_SELECTED, ROLE_NOT_FOUND,
};
pub use middleware::{RateLimiter, SecurityConfig};

/// Shared state for every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(store: Store, assistant: Assistant) -> Self {
        Self { store, assistant }
    }
}

/// Router with permissive CORS and no rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_security(state, SecurityConfig::disabled())
}

pub fn create_router_with_security(state: AppState, security: SecurityConfig) -> Router {
    let mut chat = post(handlers::chat);
    if let Some(limiter) = security.rate_limiter.clone() {
        chat = chat.route_layer(from_fn_with_state(limiter, middleware::rate_limit_middleware));
    }

    let api = Router::new()
        // Chat
        .route("/chat", chat)
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        // Roles
        .route("/roles", get(handlers::list_roles))
        .route("/roles/options", get(handlers::list_role_options))
        .route("/roles/{id}", get(handlers::get_role))
        .route("/roles/{id}/tasks", get(handlers::list_role_tasks))
        .route("/roles/{id}/tasks/grouped", get(handlers::get_grouped_tasks))
        .route("/roles/{id}/tasks/next", get(handlers::get_next_task))
        .route("/roles/{id}/progress", get(handlers::get_task_progress))
        .route("/roles/{id}/policies", get(handlers::list_role_policies))
        .route("/roles/{id}/people", get(handlers::list_role_people))
        .route("/roles/{id}/learning", get(handlers::get_role_learning))
        .route(
            "/roles/{id}/learning/progress",
            get(handlers::get_learning_progress),
        )
        // Policies
        .route("/policies", get(handlers::list_policies))
        .route("/policies/{id}", get(handlers::get_policy))
        // People and learning catalog
        .route("/people", get(handlers::list_people))
        .route("/courses", get(handlers::list_courses))
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route("/employees/{id}", get(handlers::get_employee))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security.cors_layer()),
        )
        .with_state(state)
}
