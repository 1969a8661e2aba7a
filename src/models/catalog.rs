use serde::{Deserialize, Serialize};

/// Motion picture rating classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mpa {
    pub id: i32,
    /// Filled in from the catalog, so requests may omit it
    #[serde(default)]
    pub name: String,
}

/// Film genre tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

impl Mpa {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Genre {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Rating classifications every backend is seeded with
pub const MPA_RATINGS: [(i32, &str); 5] = [
    (1, "G"),
    (2, "PG"),
    (3, "PG-13"),
    (4, "R"),
    (5, "NC-17"),
];

/// Genres every backend is seeded with
pub const GENRES: [(i32, &str); 6] = [
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Animation"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];
