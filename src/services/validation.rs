//! Field checks run before any film or user is stored
//!
//! These are pure: nothing is rewritten here. Defaulting a blank user
//! name to the login is done by the caller before validating.

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{FilmData, UserData},
};

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Date of the first public film screening
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid earliest release date"),
};

/// Checks film attributes; rating and genres are not inspected
pub fn validate_film(film: &FilmData) -> AppResult<()> {
    if film.name.trim().is_empty() {
        return Err(reject("name", "must not be blank"));
    }

    let description_length = film.description.chars().count();
    if description_length > MAX_DESCRIPTION_LENGTH {
        return Err(reject(
            "description",
            format!(
                "must be at most {MAX_DESCRIPTION_LENGTH} characters, got {description_length}"
            ),
        ));
    }

    if film.release_date < EARLIEST_RELEASE_DATE {
        return Err(reject(
            "releaseDate",
            format!("must not be earlier than {EARLIEST_RELEASE_DATE}"),
        ));
    }

    if film.duration < 0 {
        return Err(reject("duration", "must not be negative"));
    }

    Ok(())
}

/// Checks user attributes against `today` for the birthday bound
pub fn validate_user(user: &UserData, today: NaiveDate) -> AppResult<()> {
    if user.email.trim().is_empty() || !user.email.contains('@') {
        return Err(reject("email", "must be non-empty and contain '@'"));
    }

    if user.login.is_empty() || user.login.chars().any(char::is_whitespace) {
        return Err(reject("login", "must be non-empty and contain no whitespace"));
    }

    if user.birthday > today {
        return Err(reject("birthday", "must not be in the future"));
    }

    Ok(())
}

fn reject(field: &'static str, reason: impl Into<String>) -> AppError {
    let err = AppError::validation(field, reason);
    tracing::warn!(field, error = %err, "Validation failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn film() -> FilmData {
        FilmData {
            name: "L'Arrivée d'un train".to_string(),
            description: "A train pulls into a station".to_string(),
            release_date: date(1896, 1, 25),
            duration: 1,
            mpa: None,
            genres: vec![],
        }
    }

    fn user() -> UserData {
        UserData {
            email: "a@b.com".to_string(),
            login: "al".to_string(),
            name: String::new(),
            birthday: date(1990, 1, 1),
        }
    }

    fn failed_field(result: AppResult<()>) -> &'static str {
        match result {
            Err(AppError::Validation { field, .. }) => field,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_film_passes() {
        assert!(validate_film(&film()).is_ok());
    }

    #[test]
    fn test_blank_film_name_rejected() {
        for name in ["", "   ", "\t"] {
            let film = FilmData {
                name: name.to_string(),
                ..film()
            };
            assert_eq!(failed_field(validate_film(&film)), "name");
        }
    }

    #[test]
    fn test_description_length_boundary() {
        let at_limit = FilmData {
            description: "й".repeat(200),
            ..film()
        };
        assert!(validate_film(&at_limit).is_ok());

        let over_limit = FilmData {
            description: "x".repeat(201),
            ..film()
        };
        assert_eq!(failed_field(validate_film(&over_limit)), "description");
    }

    #[test]
    fn test_release_date_boundary() {
        let first_screening = FilmData {
            release_date: date(1895, 12, 28),
            ..film()
        };
        assert!(validate_film(&first_screening).is_ok());

        let day_before = FilmData {
            release_date: date(1895, 12, 27),
            ..film()
        };
        assert_eq!(failed_field(validate_film(&day_before)), "releaseDate");
    }

    #[test]
    fn test_earliest_release_date_is_first_screening() {
        assert_eq!(EARLIEST_RELEASE_DATE, date(1895, 12, 28));
    }

    #[test]
    fn test_duration_boundary() {
        let zero = FilmData {
            duration: 0,
            ..film()
        };
        assert!(validate_film(&zero).is_ok());

        let negative = FilmData {
            duration: -1,
            ..film()
        };
        assert_eq!(failed_field(validate_film(&negative)), "duration");
    }

    #[test]
    fn test_valid_user_passes_with_blank_name() {
        assert!(validate_user(&user(), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_email_rules() {
        for email in ["", "  ", "no-at-sign.com"] {
            let user = UserData {
                email: email.to_string(),
                ..user()
            };
            assert_eq!(failed_field(validate_user(&user, date(2024, 1, 1))), "email");
        }
    }

    #[test]
    fn test_login_rules() {
        for login in ["", "two words", "tab\there"] {
            let user = UserData {
                login: login.to_string(),
                ..user()
            };
            assert_eq!(failed_field(validate_user(&user, date(2024, 1, 1))), "login");
        }
    }

    #[test]
    fn test_birthday_relative_to_today() {
        let today = date(2024, 6, 1);
        let born_today = UserData {
            birthday: today,
            ..user()
        };
        assert!(validate_user(&born_today, today).is_ok());

        let born_tomorrow = UserData {
            birthday: date(2024, 6, 2),
            ..user()
        };
        assert_eq!(failed_field(validate_user(&born_tomorrow, today)), "birthday");
    }

    #[test]
    fn test_validation_does_not_rewrite_name() {
        let user = user();
        validate_user(&user, date(2024, 1, 1)).unwrap();
        assert_eq!(user.name, "");
    }
}
