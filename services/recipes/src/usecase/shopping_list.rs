use uuid::Uuid;

use crate::domain::repository::RecipeRepository;
use crate::domain::shopping_list::{aggregate_shopping_list, render_shopping_list};
use crate::domain::types::ShoppingListItem;
use crate::error::RecipesServiceError;

// ── GetShoppingList ──────────────────────────────────────────────────────────

pub struct GetShoppingListUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetShoppingListUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ShoppingListItem>, RecipesServiceError> {
        let lines = self.repo.cart_lines(user_id).await?;
        Ok(aggregate_shopping_list(&lines))
    }

    /// Text rendering of [`Self::execute`] for the download endpoint.
    pub async fn render(&self, user_id: Uuid) -> Result<String, RecipesServiceError> {
        let items = self.execute(user_id).await?;
        Ok(render_shopping_list(&items))
    }
}
