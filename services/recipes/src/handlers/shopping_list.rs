use axum::{Json, extract::State};
use axum_extra::response::Attachment;
use serde::Serialize;

use larder_auth_types::identity::IdentityHeaders;

use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::domain::types::ShoppingListItem;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::shopping_list::GetShoppingListUseCase;

#[derive(Serialize)]
pub struct ShoppingListItemResponse {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
    pub recipe_count: usize,
}

impl From<ShoppingListItem> for ShoppingListItemResponse {
    fn from(item: ShoppingListItem) -> Self {
        Self {
            name: item.name,
            measurement_unit: item.measurement_unit,
            total_amount: item.total,
            recipe_count: item.recipe_count,
        }
    }
}

// ── GET /recipes/shopping_list ───────────────────────────────────────────────

pub async fn get_shopping_list(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<ShoppingListItemResponse>>, RecipesServiceError> {
    let usecase = GetShoppingListUseCase {
        repo: state.recipe_repo(),
    };
    let items = usecase.execute(identity.user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_list(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Attachment<String>, RecipesServiceError> {
    let usecase = GetShoppingListUseCase {
        repo: state.recipe_repo(),
    };
    let body = usecase.render(identity.user_id).await?;
    Ok(Attachment::new(body)
        .filename(SHOPPING_LIST_FILENAME)
        .content_type("text/plain; charset=utf-8"))
}
