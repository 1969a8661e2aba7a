pub mod catalog;
pub mod film;
pub mod user;

pub use catalog::{Genre, Mpa};
pub use film::{Film, FilmData, FilmId};
pub use user::{User, UserData, UserId};
