use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    db::{
        CatalogStore, FilmStore, InMemoryCatalogStore, InMemoryFilmStore, InMemoryUserStore,
        PgStore, UserStore,
    },
    services::{CatalogService, FilmService, UserService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub films: FilmService,
    pub users: UserService,
    pub catalog: CatalogService,
}

impl AppState {
    /// Wires the services to a set of stores
    pub fn from_stores(
        films: Arc<dyn FilmStore>,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
    ) -> Self {
        Self {
            films: FilmService::new(films, users.clone(), catalog.clone()),
            users: UserService::new(users),
            catalog: CatalogService::new(catalog),
        }
    }

    /// State backed by process-lifetime maps
    pub fn in_memory() -> Self {
        Self::from_stores(
            Arc::new(InMemoryFilmStore::new()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryCatalogStore::new()),
        )
    }

    /// State backed by PostgreSQL tables
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::from_stores(store.clone(), store.clone(), store)
    }
}
