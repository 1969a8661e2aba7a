//! Storage contract for films, users and the reference catalogs
//!
//! Services only talk to these traits, so the in-memory and PostgreSQL
//! backends are interchangeable at composition time. Mutations that touch
//! a relationship (likes, friendships) are single store calls so that each
//! backend can apply them atomically.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Film, FilmData, FilmId, Genre, Mpa, User, UserData, UserId},
};

pub mod memory;
pub mod postgres;


pub use memory::{InMemoryCatalogStore, InMemoryFilmStore, InMemoryUserStore};
pub use postgres::{create_pool, run_migrations, PgStore};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// Inserts a film under the next free id
    async fn add(&self, film: FilmData) -> AppResult<Film>;

    /// Replaces every attribute except id and likes; NotFound if absent
    async fn update(&self, id: FilmId, film: FilmData) -> AppResult<Film>;

    async fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>>;

    /// All films, ascending by id
    async fn get_all(&self) -> AppResult<Vec<Film>>;

    /// Records a like; repeating it is a no-op. NotFound if the film is absent
    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film>;

    /// Drops a like if present. NotFound if the film is absent
    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add(&self, user: UserData) -> AppResult<User>;

    async fn update(&self, id: UserId, user: UserData) -> AppResult<User>;

    async fn get_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Resolves the given ids, skipping the ones that do not exist
    async fn get_many(&self, ids: Vec<UserId>) -> AppResult<Vec<User>>;

    /// Links both users; returns false if they were already friends.
    /// NotFound if either user is absent
    async fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    /// Unlinks both users if linked. NotFound if either user is absent
    async fn remove_friendship(&self, user_id: UserId, friend_id: UserId) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn all_mpa(&self) -> AppResult<Vec<Mpa>>;

    async fn mpa_by_id(&self, id: i32) -> AppResult<Option<Mpa>>;

    async fn all_genres(&self) -> AppResult<Vec<Genre>>;

    async fn genre_by_id(&self, id: i32) -> AppResult<Option<Genre>>;
}
