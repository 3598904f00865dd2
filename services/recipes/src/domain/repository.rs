#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_domain::recipe::RecipeSortBy;

use crate::domain::image::ImagePayload;
use crate::domain::types::{
    CartLine, Ingredient, NewIngredient, NewTag, Recipe, RecipeFilter, RecipeSummary, RecipeWrite,
    Tag, User,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` when the id, email or username is taken.
    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;

    /// Returns `false` if the user does not exist.
    async fn set_avatar(&self, id: Uuid, avatar: Option<&str>)
    -> Result<bool, RecipesServiceError>;

    /// Delete a user and, by cascade, everything they own or reference.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RecipesServiceError>;
}

/// Repository for the ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// Case-insensitive name prefix search ordered by name.
    async fn search(
        &self,
        name_prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;

    /// Insert rows whose (name, unit) pair is not present yet. Returns the number inserted.
    async fn insert_missing(&self, rows: &[NewIngredient]) -> Result<u64, RecipesServiceError>;
}

/// Repository for tags.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;

    /// Insert tags whose name, color and slug are all unused. Returns the number inserted.
    async fn insert_missing(&self, rows: &[NewTag]) -> Result<u64, RecipesServiceError>;
}

/// Repository for recipes and their ingredient/tag links.
pub trait RecipeRepository: Send + Sync {
    async fn list(
        &self,
        filter: &RecipeFilter,
        sort_by: RecipeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn author_of(&self, id: i32) -> Result<Option<Uuid>, RecipesServiceError>;

    /// Insert the recipe with its ingredient lines and tags in one transaction.
    async fn create(
        &self,
        author_id: Uuid,
        write: &RecipeWrite,
        image: &str,
    ) -> Result<i32, RecipesServiceError>;

    /// Replace the recipe's fields, ingredient lines and tags in one transaction.
    /// `image: None` keeps the current image.
    async fn update(
        &self,
        id: i32,
        write: &RecipeWrite,
        image: Option<&str>,
    ) -> Result<(), RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// Newest-first recipe cards of each author, at most `limit` per author
    /// when set. Authors without recipes are absent from the map.
    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError>;

    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError>;

    /// Image references of every recipe the author owns.
    async fn images_by_author(&self, author_id: Uuid) -> Result<Vec<String>, RecipesServiceError>;

    /// Every ingredient line of every recipe in the user's cart.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError>;
}

/// (user, recipe) relations toggled by explicit add/remove calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeRelation {
    Favorite,
    ShoppingCart,
}

impl RecipeRelation {
    pub fn duplicate_error(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::AlreadyFavorited,
            Self::ShoppingCart => RecipesServiceError::AlreadyInShoppingCart,
        }
    }

    pub fn missing_error(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::NotInFavorites,
            Self::ShoppingCart => RecipesServiceError::NotInShoppingCart,
        }
    }
}

/// Repository for one (user, recipe) relation table.
pub trait RecipeRelationRepository: Send + Sync {
    fn relation(&self) -> RecipeRelation;

    /// Insert the pair. Returns `false` if it already existed; a missing
    /// recipe is `RecipeNotFound`.
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Subset of `recipe_ids` related to the user.
    async fn filter_existing(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;
}

/// Repository for author subscriptions.
pub trait SubscriptionRepository: Send + Sync {
    /// Insert the pair. Returns `false` if it already existed; a missing author
    /// is `UserNotFound`.
    async fn add(&self, subscriber_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError>;

    /// Authors the subscriber follows, most recently followed first.
    async fn list_authors(
        &self,
        subscriber_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError>;

    /// Subset of `author_ids` the subscriber follows.
    async fn subscribed_among(
        &self,
        subscriber_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError>;
}

/// Blob storage for uploaded images.
pub trait ImageStore: Send + Sync {
    /// Persist the image under `folder` and return its public URL.
    async fn save(&self, folder: &str, image: &ImagePayload) -> Result<String, RecipesServiceError>;

    /// Remove a previously saved image. Unknown or already removed URLs are not an error.
    async fn delete(&self, url: &str) -> Result<(), RecipesServiceError>;
}
