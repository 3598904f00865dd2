use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use larder_auth_types::identity::IdentityHeaders;
use larder_domain::pagination::{DEFAULT_LIMIT, PageRequest};

use crate::domain::types::{SubscriptionView, UserView};
use crate::error::RecipesServiceError;
use crate::handlers::{RecipeSummaryResponse, UserResponse, parse_query};
use crate::state::AppState;
use crate::usecase::subscription::{
    GetSubscriptionUseCase, ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

#[derive(Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<SubscriptionView> for SubscriptionResponse {
    fn from(view: SubscriptionView) -> Self {
        Self {
            author: UserResponse::from(UserView {
                user: view.author,
                // Every listed author is followed by the viewer.
                is_subscribed: true,
            }),
            recipes: view.recipes.into_iter().map(Into::into).collect(),
            recipes_count: view.recipes_count,
        }
    }
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscriptionListQuery {
    pub recipes_limit: Option<u64>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<SubscriptionResponse>>, RecipesServiceError> {
    let query: SubscriptionListQuery = parse_query(raw_query)?;
    let usecase = ListSubscriptionsUseCase {
        repo: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let views = usecase
        .execute(
            identity.user_id,
            query.recipes_limit,
            PageRequest::from_query(query.limit, query.page, DEFAULT_LIMIT),
        )
        .await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── POST/DELETE /users/{id}/subscribe ────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<u64>,
}

/// Answers with the followed author in the same shape as the listing.
pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<SubscriptionResponse>), RecipesServiceError> {
    let query: SubscribeQuery = parse_query(raw_query)?;
    let usecase = SubscribeUseCase {
        repo: state.subscription_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;

    let read = GetSubscriptionUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let view = read.execute(author_id, query.recipes_limit).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = UnsubscribeUseCase {
        repo: state.subscription_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
