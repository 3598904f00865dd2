use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use larder_auth_types::identity::IdentityHeaders;
use larder_domain::pagination::PageRequest;
use larder_domain::recipe::RecipeSortBy;

use crate::domain::validation::{IngredientLineDraft, RecipeDraft};
use crate::error::RecipesServiceError;
use crate::handlers::{RecipeResponse, flag, parse_query};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesQuery, ListRecipesUseCase, RECIPE_LIST_DEFAULT_LIMIT, UpdateRecipeInput,
    UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientLineRequest {
    pub id: i32,
    pub amount: i32,
}

/// Body of both create and update. `image` is a base64 data URI.
#[derive(Deserialize)]
pub struct RecipeWriteRequest {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientLineRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub image: Option<String>,
}

impl RecipeWriteRequest {
    fn into_parts(self) -> (RecipeDraft, Option<String>) {
        let draft = RecipeDraft {
            name: self.name,
            text: self.text,
            cooking_time: self.cooking_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|line| IngredientLineDraft {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
            tag_ids: self.tags,
        };
        (draft, self.image)
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub author: Option<Uuid>,
    #[serde(default, deserialize_with = "flag")]
    pub is_favorited: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_in_shopping_cart: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "sort-by")]
    pub sort_by: Option<RecipeSortBy>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let query: RecipeListQuery = parse_query(raw_query)?;
    let usecase = ListRecipesUseCase {
        repo: state.recipe_repo(),
        favorites: state.favorite_repo(),
        cart: state.cart_repo(),
        subscriptions: state.subscription_repo(),
    };
    let recipes = usecase
        .execute(
            identity.map(|i| i.user_id),
            ListRecipesQuery {
                author_id: query.author,
                is_favorited: query.is_favorited,
                is_in_shopping_cart: query.is_in_shopping_cart,
                tag_slugs: query.tags,
                sort_by: query.sort_by.unwrap_or_default(),
                page: PageRequest::from_query(query.limit, query.page, RECIPE_LIST_DEFAULT_LIMIT),
            },
        )
        .await?;
    Ok(Json(recipes.into_iter().map(Into::into).collect()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RecipeWriteRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let (draft, image) = body.into_parts();
    let usecase = CreateRecipeUseCase {
        repo: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
        images: state.image_store(),
        limits: state.config.limits.clone(),
    };
    let recipe = usecase
        .execute(identity.user_id, CreateRecipeInput { draft, image })
        .await?;
    tracing::info!(recipe_id = recipe.recipe.id, author_id = %identity.user_id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        repo: state.recipe_repo(),
        favorites: state.favorite_repo(),
        cart: state.cart_repo(),
        subscriptions: state.subscription_repo(),
    };
    let recipe = usecase.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(recipe.into()))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

/// Replaces every field and link; the image is kept when omitted.
pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RecipeWriteRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let (draft, image) = body.into_parts();
    let usecase = UpdateRecipeUseCase {
        repo: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
        images: state.image_store(),
        limits: state.config.limits.clone(),
    };
    usecase
        .execute(identity.user_id, id, UpdateRecipeInput { draft, image })
        .await?;

    let read = GetRecipeUseCase {
        repo: state.recipe_repo(),
        favorites: state.favorite_repo(),
        cart: state.cart_repo(),
        subscriptions: state.subscription_repo(),
    };
    let recipe = read.execute(Some(identity.user_id), id).await?;
    Ok(Json(recipe.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
        images: state.image_store(),
    };
    usecase.execute(identity.user_id, id).await?;
    tracing::info!(recipe_id = id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
