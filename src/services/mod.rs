pub mod catalog;
pub mod films;
pub mod users;
pub mod validation;

pub use catalog::CatalogService;
pub use films::FilmService;
pub use users::UserService;
