use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::{
    db::UserStore,
    error::{AppError, AppResult, EntityKind},
    models::{User, UserData, UserId},
};

use super::validation::validate_user;

/// User CRUD and friendship management
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn all_users(&self) -> AppResult<Vec<User>> {
        self.users.get_all().await
    }

    pub async fn user_by_id(&self, id: UserId) -> AppResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, id))
    }

    #[instrument(skip(self, user), fields(login = %user.login))]
    pub async fn add_user(&self, user: UserData) -> AppResult<User> {
        let user = prepare(user)?;
        let stored = self.users.add(user).await?;
        tracing::info!(user_id = stored.id(), "User added");
        Ok(stored)
    }

    #[instrument(skip(self, user))]
    pub async fn update_user(&self, id: UserId, user: UserData) -> AppResult<User> {
        self.user_by_id(id).await?;
        let user = prepare(user)?;
        let stored = self.users.update(id, user).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(stored)
    }

    /// Makes two users friends of each other; repeating it is not an error
    #[instrument(skip(self))]
    pub async fn add_friend(&self, id: UserId, friend_id: UserId) -> AppResult<()> {
        reject_self(id, friend_id)?;
        let inserted = self.users.add_friendship(id, friend_id).await?;
        if inserted {
            tracing::info!("Friendship added");
        } else {
            tracing::debug!("Users already friends");
        }
        Ok(())
    }

    /// Ends a friendship on both sides; not being friends is not an error
    #[instrument(skip(self))]
    pub async fn remove_friend(&self, id: UserId, friend_id: UserId) -> AppResult<()> {
        reject_self(id, friend_id)?;
        self.users.remove_friendship(id, friend_id).await?;
        tracing::info!("Friendship removed");
        Ok(())
    }

    /// Friends of a user, skipping ids that no longer resolve
    pub async fn friends_of(&self, id: UserId) -> AppResult<Vec<User>> {
        let user = self.user_by_id(id).await?;
        self.resolve(user.friends().iter().copied().collect()).await
    }

    /// Users that are friends with both `id` and `other_id`
    pub async fn common_friends(&self, id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        let user = self.user_by_id(id).await?;
        let other = self.user_by_id(other_id).await?;
        let shared = user
            .friends()
            .intersection(other.friends())
            .copied()
            .collect();
        self.resolve(shared).await
    }

    async fn resolve(&self, ids: Vec<UserId>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let requested = ids.len();
        let users = self.users.get_many(ids).await?;
        if users.len() < requested {
            tracing::warn!(
                requested,
                resolved = users.len(),
                "Dropped friend ids that no longer resolve"
            );
        }
        Ok(users)
    }
}

/// Defaults a blank name to the login, then validates
fn prepare(user: UserData) -> AppResult<UserData> {
    let user = user.with_default_name();
    validate_user(&user, Utc::now().date_naive())?;
    Ok(user)
}

fn reject_self(id: UserId, friend_id: UserId) -> AppResult<()> {
    if id == friend_id {
        return Err(AppError::InvalidArgument(format!(
            "user {id} cannot be their own friend"
        )));
    }
    Ok(())
}
