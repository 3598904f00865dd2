//! Favorite and shopping-cart toggles: POST adds the pair and answers with the
//! recipe card, DELETE removes it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use larder_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::handlers::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::recipe::GetRecipeSummaryUseCase;
use crate::usecase::relation::{AddRecipeRelationUseCase, RemoveRecipeRelationUseCase};

async fn recipe_card(
    state: &AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let read = GetRecipeSummaryUseCase {
        repo: state.recipe_repo(),
    };
    let summary = read.execute(recipe_id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── POST/DELETE /recipes/{id}/favorite ───────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = AddRecipeRelationUseCase {
        repo: state.favorite_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    recipe_card(&state, recipe_id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveRecipeRelationUseCase {
        repo: state.favorite_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /recipes/{id}/shopping_cart ──────────────────────────────────

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let usecase = AddRecipeRelationUseCase {
        repo: state.cart_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    recipe_card(&state, recipe_id).await
}

pub async fn remove_from_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveRecipeRelationUseCase {
        repo: state.cart_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
