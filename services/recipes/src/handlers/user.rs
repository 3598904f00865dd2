use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_auth_types::identity::IdentityHeaders;
use larder_domain::pagination::{DEFAULT_LIMIT, PageRequest};
use larder_domain::user::UserRole;

use crate::error::RecipesServiceError;
use crate::handlers::{UserResponse, parse_query};
use crate::state::AppState;
use crate::usecase::user::{
    ClearAvatarUseCase, CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase,
    ListUsersUseCase, SetAvatarUseCase,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profiles are provisioned by the identity provider, never self-registered.
pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    if UserRole::from_u8(identity.user_role) != Some(UserRole::Service) {
        return Err(RecipesServiceError::Forbidden);
    }
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            id: body.id,
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user profile created");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            is_subscribed: false,
        }),
    ))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UserListQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<UserResponse>>, RecipesServiceError> {
    let query: UserListQuery = parse_query(raw_query)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let users = usecase
        .execute(
            identity.map(|i| i.user_id),
            PageRequest::from_query(query.limit, query.page, DEFAULT_LIMIT),
        )
        .await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let user = usecase.execute(identity.map(|i| i.user_id), user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let user = usecase
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/@me ────────────────────────────────────────────────────────

pub async fn delete_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
        recipes: state.recipe_repo(),
        images: state.image_store(),
    };
    usecase.execute(identity.user_id).await?;
    tracing::info!(user_id = %identity.user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT/DELETE /users/@me/avatar ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetAvatarRequest {
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

pub async fn set_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SetAvatarRequest>,
) -> Result<Json<AvatarResponse>, RecipesServiceError> {
    let usecase = SetAvatarUseCase {
        repo: state.user_repo(),
        images: state.image_store(),
    };
    let avatar = usecase
        .execute(identity.user_id, body.avatar.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(AvatarResponse { avatar }))
}

pub async fn clear_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = ClearAvatarUseCase {
        repo: state.user_repo(),
        images: state.image_store(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
