//! Favorite and shopping-cart toggles. Both relations share one shape, so
//! each use case is written once against `RecipeRelationRepository`.

use uuid::Uuid;

use crate::domain::repository::RecipeRelationRepository;
use crate::error::RecipesServiceError;

// ── AddRecipeRelation ────────────────────────────────────────────────────────

pub struct AddRecipeRelationUseCase<R: RecipeRelationRepository> {
    pub repo: R,
}

impl<R: RecipeRelationRepository> AddRecipeRelationUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if !self.repo.add(user_id, recipe_id).await? {
            return Err(self.repo.relation().duplicate_error());
        }
        Ok(())
    }
}

// ── RemoveRecipeRelation ─────────────────────────────────────────────────────

pub struct RemoveRecipeRelationUseCase<R: RecipeRelationRepository> {
    pub repo: R,
}

impl<R: RecipeRelationRepository> RemoveRecipeRelationUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if !self.repo.remove(user_id, recipe_id).await? {
            return Err(self.repo.relation().missing_error());
        }
        Ok(())
    }
}
