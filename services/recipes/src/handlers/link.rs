use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use crate::error::RecipesServiceError;
use crate::infra::db::DbRecipeRepository;
use crate::state::AppState;
use crate::usecase::recipe::GetRecipeLinkUseCase;

#[derive(Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

fn link_usecase(state: &AppState) -> GetRecipeLinkUseCase<DbRecipeRepository> {
    GetRecipeLinkUseCase {
        repo: state.recipe_repo(),
        public_base_url: state.config.public_base_url.clone(),
    }
}

// ── GET /recipes/{id}/get-link ───────────────────────────────────────────────

pub async fn get_recipe_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, RecipesServiceError> {
    let short_link = link_usecase(&state).execute(id).await?;
    Ok(Json(ShortLinkResponse { short_link }))
}

// ── GET /r/{id} ──────────────────────────────────────────────────────────────

pub async fn follow_short_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let location = link_usecase(&state).resolve(id).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
