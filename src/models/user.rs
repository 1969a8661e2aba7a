use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub type UserId = i64;

/// Caller-supplied user attributes, used for both creation and update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub email: String,
    pub login: String,
    /// Display name, falls back to `login` when blank, missing or null
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub birthday: NaiveDate,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserData {
    /// Substitutes the login for a blank display name
    pub fn with_default_name(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
        }
        self
    }
}

/// A stored user
///
/// Friendship is symmetric; the friend set is only changed through the
/// storage layer, which updates both sides together.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    data: UserData,
    friends: BTreeSet<UserId>,
}

impl User {
    pub(crate) fn new(id: UserId, data: UserData) -> Self {
        Self {
            id,
            data,
            friends: BTreeSet::new(),
        }
    }

    pub(crate) fn with_friends(mut self, friends: BTreeSet<UserId>) -> Self {
        self.friends = friends;
        self
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    pub fn login(&self) -> &str {
        &self.data.login
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn friends(&self) -> &BTreeSet<UserId> {
        &self.friends
    }

    pub fn is_friend_of(&self, other: UserId) -> bool {
        self.friends.contains(&other)
    }

    pub(crate) fn replace_data(&mut self, data: UserData) {
        self.data = data;
    }

    pub(crate) fn insert_friend(&mut self, friend_id: UserId) -> bool {
        self.friends.insert(friend_id)
    }

    pub(crate) fn remove_friend(&mut self, friend_id: UserId) -> bool {
        self.friends.remove(&friend_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(login: &str, name: &str) -> UserData {
        UserData {
            email: "bob@example.com".to_string(),
            login: login.to_string(),
            name: name.to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_blank_name_defaults_to_login() {
        assert_eq!(data("bob", "").with_default_name().name, "bob");
        assert_eq!(data("bob", "   ").with_default_name().name, "bob");
    }

    #[test]
    fn test_present_name_kept() {
        assert_eq!(data("bob", "Robert").with_default_name().name, "Robert");
    }

    #[test]
    fn test_missing_name_deserializes_empty() {
        let data: UserData = serde_json::from_str(
            r#"{"email":"a@b.com","login":"al","birthday":"1990-01-01"}"#,
        )
        .unwrap();
        assert_eq!(data.name, "");
    }

    #[test]
    fn test_null_name_deserializes_empty() {
        let data: UserData = serde_json::from_str(
            r#"{"email":"a@b.com","login":"bob","name":null,"birthday":"1990-01-01"}"#,
        )
        .unwrap();
        assert_eq!(data.with_default_name().name, "bob");
    }

    #[test]
    fn test_user_serializes_friends() {
        let mut user = User::new(1, data("bob", "Bob"));
        user.insert_friend(2);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["login"], "bob");
        assert_eq!(json["friends"], serde_json::json!([2]));
    }
}
