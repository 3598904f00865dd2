use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::Deserialize;

use larder_domain::pagination::{DEFAULT_LIMIT, PageRequest};

use crate::error::RecipesServiceError;
use crate::handlers::{IngredientResponse, TagResponse, parse_query};
use crate::state::AppState;
use crate::usecase::catalog::{
    GetIngredientUseCase, GetTagUseCase, ListTagsUseCase, SearchIngredientsUseCase,
};

// ── GET /tags ────────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

// ── GET /tags/{id} ───────────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /ingredients ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct IngredientSearchQuery {
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, RecipesServiceError> {
    let query: IngredientSearchQuery = parse_query(raw_query)?;
    let usecase = SearchIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase
        .execute(
            query.name.as_deref(),
            PageRequest::from_query(query.limit, query.page, DEFAULT_LIMIT),
        )
        .await?;
    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

// ── GET /ingredients/{id} ────────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, RecipesServiceError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
