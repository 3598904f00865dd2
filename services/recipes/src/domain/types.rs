use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use larder_domain::tag::TagColor;

/// Account profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Tag row accepted by bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: TagColor,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Ingredient row accepted by bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// Catalog ingredient together with the amount one recipe uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient: Ingredient,
    pub amount: i16,
}

/// Recipe with its author, tags and ingredient lines resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author: User,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i16,
    pub pub_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Short recipe card used in subscription listings and toggle responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeIngredientLine {
    pub ingredient_id: i32,
    pub amount: i16,
}

/// Validated recipe fields ready to persist. The image reference is passed
/// separately since it is optional on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWrite {
    pub name: String,
    pub text: String,
    pub cooking_time: i16,
    pub ingredients: Vec<RecipeIngredientLine>,
    pub tag_ids: Vec<i32>,
}

/// Filters for recipe listings. Every set field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
    /// Any-of match on tag slugs.
    pub tag_slugs: Vec<String>,
}

/// One ingredient line of a recipe sitting in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i16,
}

/// Consolidated shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
    pub recipe_count: usize,
}

/// Per-principal relation flags. `Default` is the anonymous viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub favorited: HashSet<i32>,
    pub in_cart: HashSet<i32>,
    pub subscribed: HashSet<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author_is_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Followed author with a preview of their newest recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionView {
    pub author: User,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

impl ViewerContext {
    pub fn user_view(&self, user: User) -> UserView {
        UserView {
            is_subscribed: self.subscribed.contains(&user.id),
            user,
        }
    }

    pub fn recipe_view(&self, recipe: Recipe) -> RecipeView {
        RecipeView {
            author_is_subscribed: self.subscribed.contains(&recipe.author.id),
            is_favorited: self.favorited.contains(&recipe.id),
            is_in_shopping_cart: self.in_cart.contains(&recipe.id),
            recipe,
        }
    }
}

/// Attach viewer flags to each recipe, keeping order.
pub fn assemble_recipe_views(recipes: Vec<Recipe>, viewer: &ViewerContext) -> Vec<RecipeView> {
    recipes
        .into_iter()
        .map(|recipe| viewer.recipe_view(recipe))
        .collect()
}
