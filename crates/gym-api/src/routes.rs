//! Router
//!
//! Auth is attached per method with `route_layer`, so one path can mix
//! public, token-only and admin-only methods.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handlers::{self, checkins, health, members, packages, payments, users};
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth = || from_fn_with_state(state.clone(), require_auth);
    let admin = || from_fn_with_state(state.clone(), require_admin);

    let api = Router::new()
        .route("/health", get(health::health_check))
        // Users
        .route("/users/login", post(users::login))
        .route(
            "/users",
            get(users::list)
                .route_layer(auth())
                .merge(post(users::create).route_layer(admin())),
        )
        // Any authenticated user may edit any account, role included.
        .route(
            "/users/{id}",
            put(users::update)
                .route_layer(auth())
                .merge(axum::routing::delete(users::delete).route_layer(admin())),
        )
        // Members
        .route(
            "/members",
            get(members::list).merge(post(members::create).route_layer(admin())),
        )
        .route(
            "/members/{id}",
            get(members::get).merge(
                put(members::update)
                    .delete(members::delete)
                    .route_layer(admin()),
            ),
        )
        // Packages
        .route(
            "/packages",
            get(packages::list).merge(post(packages::create).route_layer(admin())),
        )
        .route(
            "/packages/{id}",
            get(packages::get).merge(
                put(packages::update)
                    .delete(packages::delete)
                    .route_layer(admin()),
            ),
        )
        // Check-ins
        .route(
            "/checkins",
            get(checkins::list).post(checkins::create).route_layer(auth()),
        )
        .route(
            "/checkins/{id}",
            get(checkins::get)
                .route_layer(auth())
                .merge(axum::routing::delete(checkins::delete).route_layer(admin())),
        )
        .route(
            "/checkins/{id}/checkout",
            put(checkins::check_out).route_layer(auth()),
        )
        // Payments
        .route(
            "/payments",
            get(payments::list).post(payments::create).route_layer(auth()),
        )
        .route(
            "/payments/{id}",
            get(payments::get).route_layer(auth()).merge(
                put(payments::update)
                    .delete(payments::delete)
                    .route_layer(admin()),
            ),
        );

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
