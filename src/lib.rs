//! Film and user catalog with likes, friendships and popularity ranking.
//!
//! Services in [`services`] hold the rules; [`db`] defines the storage
//! contract and its in-memory and PostgreSQL backends; [`api`] is the thin
//! HTTP surface over the services.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
