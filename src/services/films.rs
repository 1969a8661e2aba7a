use std::{cmp::Reverse, collections::BTreeMap, sync::Arc};

use tracing::instrument;

use crate::{
    db::{CatalogStore, FilmStore, UserStore},
    error::{AppError, AppResult, EntityKind},
    models::{Film, FilmData, FilmId, Genre, UserId},
};

use super::validation::validate_film;

/// Number of films returned by the popularity ranking when no count is given
pub const DEFAULT_POPULAR_COUNT: usize = 10;

/// Film CRUD, likes and popularity ranking
#[derive(Clone)]
pub struct FilmService {
    films: Arc<dyn FilmStore>,
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl FilmService {
    pub fn new(
        films: Arc<dyn FilmStore>,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
    ) -> Self {
        Self {
            films,
            users,
            catalog,
        }
    }

    pub async fn all_films(&self) -> AppResult<Vec<Film>> {
        self.films.get_all().await
    }

    pub async fn film_by_id(&self, id: FilmId) -> AppResult<Film> {
        self.films
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Film, id))
    }

    #[instrument(skip(self, film), fields(name = %film.name))]
    pub async fn add_film(&self, film: FilmData) -> AppResult<Film> {
        validate_film(&film)?;
        let film = self.resolve_catalog_refs(film).await?;
        let stored = self.films.add(film).await?;
        tracing::info!(film_id = stored.id(), "Film added");
        Ok(stored)
    }

    /// Replaces every attribute of an existing film, leaving its likes alone
    #[instrument(skip(self, film))]
    pub async fn update_film(&self, id: FilmId, film: FilmData) -> AppResult<Film> {
        self.film_by_id(id).await?;
        validate_film(&film)?;
        let film = self.resolve_catalog_refs(film).await?;
        let stored = self.films.update(id, film).await?;
        tracing::info!(film_id = id, "Film updated");
        Ok(stored)
    }

    /// Records a like; liking twice is not an error
    #[instrument(skip(self))]
    pub async fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film> {
        self.film_by_id(film_id).await?;
        self.ensure_user(user_id).await?;
        let film = self.films.add_like(film_id, user_id).await?;
        tracing::info!(likes = film.like_count(), "Like registered");
        Ok(film)
    }

    /// Drops a like; removing one that does not exist is not an error
    #[instrument(skip(self))]
    pub async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film> {
        self.film_by_id(film_id).await?;
        self.ensure_user(user_id).await?;
        let film = self.films.remove_like(film_id, user_id).await?;
        tracing::info!(likes = film.like_count(), "Like removed");
        Ok(film)
    }

    /// Films with the most likes first, at most `count` (default 10)
    pub async fn most_popular(&self, count: Option<usize>) -> AppResult<Vec<Film>> {
        let films = self.films.get_all().await?;
        Ok(rank_by_likes(films, count.unwrap_or(DEFAULT_POPULAR_COUNT)))
    }

    async fn ensure_user(&self, id: UserId) -> AppResult<()> {
        match self.users.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(EntityKind::User, id)),
        }
    }

    /// Replaces rating and genre references with catalog entries.
    /// Duplicate genres collapse into one, ordered by id.
    async fn resolve_catalog_refs(&self, mut film: FilmData) -> AppResult<FilmData> {
        if let Some(mpa) = film.mpa.take() {
            let resolved = self
                .catalog
                .mpa_by_id(mpa.id)
                .await?
                .ok_or_else(|| AppError::not_found(EntityKind::Mpa, mpa.id))?;
            film.mpa = Some(resolved);
        }

        let mut genres: BTreeMap<i32, Genre> = BTreeMap::new();
        for genre in std::mem::take(&mut film.genres) {
            if genres.contains_key(&genre.id) {
                continue;
            }
            let resolved = self
                .catalog
                .genre_by_id(genre.id)
                .await?
                .ok_or_else(|| AppError::not_found(EntityKind::Genre, genre.id))?;
            genres.insert(resolved.id, resolved);
        }
        film.genres = genres.into_values().collect();

        Ok(film)
    }
}

/// Orders films by like count, descending, with ties broken by ascending
/// id, and keeps the first `count`.
pub fn rank_by_likes(mut films: Vec<Film>, count: usize) -> Vec<Film> {
    let count = count.min(films.len());
    films.sort_by_key(|film| (Reverse(film.like_count()), film.id()));
    films.truncate(count);
    films
}
