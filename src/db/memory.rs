use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CatalogStore, FilmStore, UserStore};
use crate::{
    error::{AppError, AppResult, EntityKind},
    models::{
        catalog::{GENRES, MPA_RATINGS},
        Film, FilmData, FilmId, Genre, Mpa, User, UserData, UserId,
    },
};

/// Entities keyed by id plus the last id handed out
///
/// Ids come from `last_id`, which never moves backwards, so an id is not
/// reused even if the entry holding it is gone.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        let max_existing = self.rows.keys().next_back().copied().unwrap_or(0);
        self.last_id = self.last_id.max(max_existing) + 1;
        self.last_id
    }

    fn get_mut(&mut self, kind: EntityKind, id: i64) -> AppResult<&mut T> {
        self.rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(kind, id))
    }
}

/// Film store living for the lifetime of the process
#[derive(Default)]
pub struct InMemoryFilmStore {
    films: RwLock<Table<Film>>,
}

impl InMemoryFilmStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FilmStore for InMemoryFilmStore {
    async fn add(&self, film: FilmData) -> AppResult<Film> {
        let mut table = self.films.write().await;
        let id = table.next_id();
        let film = Film::new(id, film);
        table.rows.insert(id, film.clone());
        debug!(film_id = id, total = table.rows.len(), "Film stored");
        Ok(film)
    }

    async fn update(&self, id: FilmId, film: FilmData) -> AppResult<Film> {
        let mut table = self.films.write().await;
        let stored = table.get_mut(EntityKind::Film, id)?;
        stored.replace_data(film);
        Ok(stored.clone())
    }

    async fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        Ok(self.films.read().await.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Film>> {
        Ok(self.films.read().await.rows.values().cloned().collect())
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film> {
        let mut table = self.films.write().await;
        let film = table.get_mut(EntityKind::Film, film_id)?;
        film.insert_like(user_id);
        Ok(film.clone())
    }

    async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<Film> {
        let mut table = self.films.write().await;
        let film = table.get_mut(EntityKind::Film, film_id)?;
        film.remove_like(user_id);
        Ok(film.clone())
    }
}

/// User store living for the lifetime of the process
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Table<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn add(&self, user: UserData) -> AppResult<User> {
        let mut table = self.users.write().await;
        let id = table.next_id();
        let user = User::new(id, user);
        table.rows.insert(id, user.clone());
        debug!(user_id = id, total = table.rows.len(), "User stored");
        Ok(user)
    }

    async fn update(&self, id: UserId, user: UserData) -> AppResult<User> {
        let mut table = self.users.write().await;
        let stored = table.get_mut(EntityKind::User, id)?;
        stored.replace_data(user);
        Ok(stored.clone())
    }

    async fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.rows.values().cloned().collect())
    }

    async fn get_many(&self, ids: Vec<UserId>) -> AppResult<Vec<User>> {
        let table = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id))
            .cloned()
            .collect())
    }

    async fn add_friendship(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        // Both sides change under the same write guard
        let mut table = self.users.write().await;
        table.get_mut(EntityKind::User, friend_id)?;
        let inserted = table.get_mut(EntityKind::User, user_id)?.insert_friend(friend_id);
        if inserted {
            table.get_mut(EntityKind::User, friend_id)?.insert_friend(user_id);
        }
        Ok(inserted)
    }

    async fn remove_friendship(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut table = self.users.write().await;
        table.get_mut(EntityKind::User, friend_id)?;
        table.get_mut(EntityKind::User, user_id)?.remove_friend(friend_id);
        table.get_mut(EntityKind::User, friend_id)?.remove_friend(user_id);
        Ok(())
    }
}

/// Fixed rating and genre catalogs
pub struct InMemoryCatalogStore {
    mpa: Vec<Mpa>,
    genres: Vec<Genre>,
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            mpa: MPA_RATINGS
                .iter()
                .map(|(id, name)| Mpa::new(*id, *name))
                .collect(),
            genres: GENRES
                .iter()
                .map(|(id, name)| Genre::new(*id, *name))
                .collect(),
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn all_mpa(&self) -> AppResult<Vec<Mpa>> {
        Ok(self.mpa.clone())
    }

    async fn mpa_by_id(&self, id: i32) -> AppResult<Option<Mpa>> {
        Ok(self.mpa.iter().find(|m| m.id == id).cloned())
    }

    async fn all_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn genre_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        Ok(self.genres.iter().find(|g| g.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contract_tests;
    use chrono::NaiveDate;
    use std::{collections::BTreeSet, sync::Arc};

    const TASKS: i64 = 32;

    fn user(login: String) -> UserData {
        UserData {
            email: format!("{login}@example.com"),
            login,
            name: String::new(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    fn film(name: String) -> FilmData {
        FilmData {
            name,
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: 90,
            mpa: None,
            genres: vec![],
        }
    }

    #[tokio::test]
    async fn test_film_store_contract() {
        contract_tests::film_store(&InMemoryFilmStore::new(), &InMemoryUserStore::new()).await;
    }

    #[tokio::test]
    async fn test_user_store_contract() {
        contract_tests::user_store(&InMemoryUserStore::new()).await;
    }

    #[tokio::test]
    async fn test_catalog_store_contract() {
        contract_tests::catalog_store(&InMemoryCatalogStore::new()).await;
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut table: Table<()> = Table::default();
        assert_eq!(table.next_id(), 1);
        table.rows.insert(1, ());
        assert_eq!(table.next_id(), 2);
        table.rows.insert(2, ());
        table.rows.remove(&2);
        assert_eq!(table.next_id(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_get_distinct_ids() {
        let films = Arc::new(InMemoryFilmStore::new());
        let users = Arc::new(InMemoryUserStore::new());

        let mut handles = Vec::new();
        for i in 0..TASKS {
            let films = films.clone();
            let users = users.clone();
            handles.push(tokio::spawn(async move {
                let stored_film = films.add(film(format!("f{i}"))).await.unwrap();
                let stored_user = users.add(user(format!("u{i}"))).await.unwrap();
                (stored_film.id(), stored_user.id())
            }));
        }

        let mut film_ids = BTreeSet::new();
        let mut user_ids = BTreeSet::new();
        for handle in handles {
            let (film_id, user_id) = handle.await.unwrap();
            film_ids.insert(film_id);
            user_ids.insert(user_id);
        }

        let expected: BTreeSet<i64> = (1..=TASKS).collect();
        assert_eq!(film_ids, expected);
        assert_eq!(user_ids, expected);
        assert_eq!(films.get_all().await.unwrap().len(), TASKS as usize);
        assert_eq!(users.get_all().await.unwrap().len(), TASKS as usize);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_friendships_stay_symmetric() {
        let store = Arc::new(InMemoryUserStore::new());
        for i in 0..8 {
            store.add(user(format!("u{i}"))).await.unwrap();
        }

        // Every pair is requested from both sides at once
        let mut handles = Vec::new();
        for a in 1..=8 {
            for b in 1..=8 {
                if a == b {
                    continue;
                }
                let store = store.clone();
                handles.push(tokio::spawn(async move {
                    store.add_friendship(a, b).await.unwrap()
                }));
            }
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        // One insert per unordered pair, the mirrored request is a no-op
        assert_eq!(inserted, 8 * 7 / 2);

        let all = store.get_all().await.unwrap();
        for user in &all {
            assert_eq!(user.friends().len(), 7);
            for friend in user.friends() {
                let other = all.iter().find(|u| u.id() == *friend).unwrap();
                assert!(other.is_friend_of(user.id()));
            }
        }
    }
}
