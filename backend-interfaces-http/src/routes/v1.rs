use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, schedule_handlers, subscription_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/schedule/active",
            axum::routing::get(schedule_handlers::active_schedule),
        )
        .route(
            "/v1/schedule/rotations",
            axum::routing::get(schedule_handlers::rotation_digest),
        )
        .route(
            "/v1/subscriptions",
            axum::routing::get(subscription_handlers::list_subscriptions),
        )
        .route(
            "/v1/subscriptions/rotation",
            axum::routing::post(subscription_handlers::add_rotation_subscription)
                .delete(subscription_handlers::remove_rotation_subscription),
        )
        .route(
            "/v1/subscriptions/daily",
            axum::routing::post(subscription_handlers::add_daily_subscription)
                .delete(subscription_handlers::remove_daily_subscription),
        )
        .route(
            "/v1/ops/test-event",
            axum::routing::post(ops_handlers::inject_test_event),
        )
        .route(
            "/v1/ops/sender-target/check",
            axum::routing::get(ops_handlers::sender_target_check),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
