use std::sync::Arc;

use crate::{
    db::CatalogStore,
    error::{AppError, AppResult, EntityKind},
    models::{Genre, Mpa},
};

/// Read-only access to the rating and genre catalogs
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    pub async fn all_mpa(&self) -> AppResult<Vec<Mpa>> {
        self.catalog.all_mpa().await
    }

    pub async fn mpa_by_id(&self, id: i32) -> AppResult<Mpa> {
        self.catalog
            .mpa_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Mpa, id))
    }

    pub async fn all_genres(&self) -> AppResult<Vec<Genre>> {
        self.catalog.all_genres().await
    }

    pub async fn genre_by_id(&self, id: i32) -> AppResult<Genre> {
        self.catalog
            .genre_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Genre, id))
    }
}
