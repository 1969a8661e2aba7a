use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{catalog, films, users, AppState};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Films
        .route("/films", get(films::all_films).post(films::add_film).put(films::update_film))
        .route("/films/popular", get(films::most_popular))
        .route("/films/:id", get(films::film_by_id))
        .route(
            "/films/:id/like/:user_id",
            put(films::add_like).delete(films::remove_like),
        )
        // Users
        .route("/users", get(users::all_users).post(users::add_user).put(users::update_user))
        .route("/users/:id", get(users::user_by_id))
        .route("/users/:id/friends", get(users::friends_of))
        .route(
            "/users/:id/friends/:friend_id",
            put(users::add_friend).delete(users::remove_friend),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(users::common_friends),
        )
        // Catalogs
        .route("/mpa", get(catalog::all_mpa))
        .route("/mpa/:id", get(catalog::mpa_by_id))
        .route("/genres", get(catalog::all_genres))
        .route("/genres/:id", get(catalog::genre_by_id))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
