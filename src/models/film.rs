use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Genre, Mpa, UserId};

pub type FilmId = i64;

/// Caller-supplied film attributes, used for both creation and update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilmData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    /// Length in minutes
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<Mpa>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A stored film
///
/// The id is assigned by storage and the set of liking users is only
/// changed through the storage layer, so both are read-only here.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    id: FilmId,
    #[serde(flatten)]
    data: FilmData,
    likes: BTreeSet<UserId>,
}

impl Film {
    pub(crate) fn new(id: FilmId, data: FilmData) -> Self {
        Self {
            id,
            data,
            likes: BTreeSet::new(),
        }
    }

    pub(crate) fn with_likes(mut self, likes: BTreeSet<UserId>) -> Self {
        self.likes = likes;
        self
    }

    pub fn id(&self) -> FilmId {
        self.id
    }

    pub fn data(&self) -> &FilmData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn likes(&self) -> &BTreeSet<UserId> {
        &self.likes
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub(crate) fn replace_data(&mut self, data: FilmData) {
        self.data = data;
    }

    /// Returns false if the user already liked the film
    pub(crate) fn insert_like(&mut self, user_id: UserId) -> bool {
        self.likes.insert(user_id)
    }

    pub(crate) fn remove_like(&mut self, user_id: UserId) -> bool {
        self.likes.remove(&user_id)
    }
}
