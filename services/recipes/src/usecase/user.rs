use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_domain::user::{PERSON_NAME_MAX_LEN, validate_email, validate_username};

use crate::domain::image::ImagePayload;
use crate::domain::repository::{
    ImageStore, RecipeRepository, SubscriptionRepository, UserRepository,
};
use crate::domain::types::{User, UserView, ViewerContext};
use crate::error::RecipesServiceError;
use crate::usecase::discard_images;

pub const AVATAR_FOLDER: &str = "avatars";

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, RecipesServiceError> {
        let email = input.email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(RecipesServiceError::InvalidEmail);
        }
        if !validate_username(&input.username) {
            return Err(RecipesServiceError::InvalidUsername);
        }
        let first_name = input.first_name.trim();
        let last_name = input.last_name.trim();
        let valid_name = |s: &str| !s.is_empty() && s.chars().count() <= PERSON_NAME_MAX_LEN;
        if !valid_name(first_name) || !valid_name(last_name) {
            return Err(RecipesServiceError::InvalidName);
        }
        let user = User {
            id: input.id.unwrap_or_else(Uuid::now_v7),
            email,
            username: input.username,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            avatar: None,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, S: SubscriptionRepository> {
    pub repo: R,
    pub subscriptions: S,
}

impl<R: UserRepository, S: SubscriptionRepository> GetUserUseCase<R, S> {
    pub async fn execute(
        &self,
        viewer_id: Option<Uuid>,
        user_id: Uuid,
    ) -> Result<UserView, RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let viewer = ViewerContext {
            subscribed: subscribed_among(&self.subscriptions, viewer_id, &[user.id]).await?,
            ..Default::default()
        };
        Ok(viewer.user_view(user))
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, S: SubscriptionRepository> {
    pub repo: R,
    pub subscriptions: S,
}

impl<R: UserRepository, S: SubscriptionRepository> ListUsersUseCase<R, S> {
    pub async fn execute(
        &self,
        viewer_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserView>, RecipesServiceError> {
        let users = self.repo.list(page).await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let viewer = ViewerContext {
            subscribed: subscribed_among(&self.subscriptions, viewer_id, &ids).await?,
            ..Default::default()
        };
        Ok(users.into_iter().map(|u| viewer.user_view(u)).collect())
    }
}

/// Anonymous viewers follow nobody.
pub(crate) async fn subscribed_among<S: SubscriptionRepository>(
    subscriptions: &S,
    viewer_id: Option<Uuid>,
    author_ids: &[Uuid],
) -> Result<HashSet<Uuid>, RecipesServiceError> {
    match viewer_id {
        Some(viewer_id) if !author_ids.is_empty() => {
            subscriptions.subscribed_among(viewer_id, author_ids).await
        }
        _ => Ok(HashSet::new()),
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository, P: RecipeRepository, I: ImageStore> {
    pub repo: R,
    pub recipes: P,
    pub images: I,
}

impl<R: UserRepository, P: RecipeRepository, I: ImageStore> DeleteUserUseCase<R, P, I> {
    /// Rows go by cascade; the avatar and recipe images are removed afterwards.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let mut orphaned = self.recipes.images_by_author(user_id).await?;
        orphaned.extend(user.avatar);

        if !self.repo.delete(user_id).await? {
            return Err(RecipesServiceError::UserNotFound);
        }
        discard_images(&self.images, &orphaned).await;
        Ok(())
    }
}

// ── SetAvatar / ClearAvatar ──────────────────────────────────────────────────

pub struct SetAvatarUseCase<R: UserRepository, I: ImageStore> {
    pub repo: R,
    pub images: I,
}

impl<R: UserRepository, I: ImageStore> SetAvatarUseCase<R, I> {
    /// Returns the stored avatar URL.
    pub async fn execute(&self, user_id: Uuid, data_uri: &str) -> Result<String, RecipesServiceError> {
        let payload = ImagePayload::from_data_uri(data_uri)?;
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let url = self.images.save(AVATAR_FOLDER, &payload).await?;
        match self.repo.set_avatar(user_id, Some(&url)).await {
            Ok(true) => {}
            Ok(false) => {
                discard_images(&self.images, &[url]).await;
                return Err(RecipesServiceError::UserNotFound);
            }
            Err(err) => {
                discard_images(&self.images, &[url]).await;
                return Err(err);
            }
        }
        if let Some(previous) = user.avatar {
            discard_images(&self.images, &[previous]).await;
        }
        Ok(url)
    }
}

pub struct ClearAvatarUseCase<R: UserRepository, I: ImageStore> {
    pub repo: R,
    pub images: I,
}

impl<R: UserRepository, I: ImageStore> ClearAvatarUseCase<R, I> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if !self.repo.set_avatar(user_id, None).await? {
            return Err(RecipesServiceError::UserNotFound);
        }
        if let Some(previous) = user.avatar {
            discard_images(&self.images, &[previous]).await;
        }
        Ok(())
    }
}
