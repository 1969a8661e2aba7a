use axum::{
    extract::{Path, State},
    Json,
};

use super::AppState;
use crate::{
    error::AppResult,
    models::{Genre, Mpa},
};

pub async fn all_mpa(State(state): State<AppState>) -> AppResult<Json<Vec<Mpa>>> {
    Ok(Json(state.catalog.all_mpa().await?))
}

pub async fn mpa_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Mpa>> {
    Ok(Json(state.catalog.mpa_by_id(id).await?))
}

pub async fn all_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.catalog.all_genres().await?))
}

pub async fn genre_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.catalog.genre_by_id(id).await?))
}
