use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::{
    error::AppResult,
    models::{Film, FilmData, FilmId, UserId},
};

#[derive(Debug, Deserialize)]
pub struct UpdateFilmRequest {
    pub id: FilmId,
    #[serde(flatten)]
    pub film: FilmData,
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<usize>,
}

pub async fn all_films(State(state): State<AppState>) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.films.all_films().await?))
}

pub async fn film_by_id(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.film_by_id(id).await?))
}

pub async fn add_film(
    State(state): State<AppState>,
    Json(film): Json<FilmData>,
) -> AppResult<(StatusCode, Json<Film>)> {
    let film = state.films.add_film(film).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn update_film(
    State(state): State<AppState>,
    Json(request): Json<UpdateFilmRequest>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.update_film(request.id, request.film).await?))
}

pub async fn add_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.add_like(id, user_id).await?))
}

pub async fn remove_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.remove_like(id, user_id).await?))
}

pub async fn most_popular(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.films.most_popular(query.count).await?))
}
