use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_domain::recipe::{RecipeLimits, RecipeSortBy};

use crate::domain::image::ImagePayload;
use crate::domain::repository::{
    ImageStore, IngredientRepository, RecipeRelationRepository, RecipeRepository,
    SubscriptionRepository, TagRepository,
};
use crate::domain::types::{
    Recipe, RecipeFilter, RecipeSummary, RecipeView, RecipeWrite, ViewerContext,
    assemble_recipe_views,
};
use crate::domain::validation::{RecipeDraft, validate_recipe};
use crate::error::RecipesServiceError;
use crate::usecase::discard_images;
use crate::usecase::user::subscribed_among;

pub const RECIPE_IMAGE_FOLDER: &str = "recipes";
pub const RECIPE_LIST_DEFAULT_LIMIT: u32 = 6;

/// Every ingredient and tag a write references must exist in the catalog.
async fn ensure_catalog_refs<I: IngredientRepository, T: TagRepository>(
    ingredients: &I,
    tags: &T,
    write: &RecipeWrite,
) -> Result<(), RecipesServiceError> {
    let ingredient_ids: Vec<i32> = write.ingredients.iter().map(|l| l.ingredient_id).collect();
    if ingredients.find_by_ids(&ingredient_ids).await?.len() != ingredient_ids.len() {
        return Err(RecipesServiceError::UnknownIngredient);
    }
    if !write.tag_ids.is_empty() && tags.find_by_ids(&write.tag_ids).await?.len() != write.tag_ids.len()
    {
        return Err(RecipesServiceError::UnknownTag);
    }
    Ok(())
}

/// Resolve favorite/cart/subscription flags of `viewer_id` for a page of recipes.
async fn load_viewer<F, C, S>(
    favorites: &F,
    cart: &C,
    subscriptions: &S,
    viewer_id: Option<Uuid>,
    recipes: &[Recipe],
) -> Result<ViewerContext, RecipesServiceError>
where
    F: RecipeRelationRepository,
    C: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    let Some(viewer_id) = viewer_id else {
        return Ok(ViewerContext::default());
    };
    if recipes.is_empty() {
        return Ok(ViewerContext::default());
    }
    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author.id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    Ok(ViewerContext {
        favorited: favorites.filter_existing(viewer_id, &recipe_ids).await?,
        in_cart: cart.filter_existing(viewer_id, &recipe_ids).await?,
        subscribed: subscribed_among(subscriptions, Some(viewer_id), &author_ids).await?,
    })
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub draft: RecipeDraft,
    /// Base64 data URI.
    pub image: Option<String>,
}

pub struct CreateRecipeUseCase<R, I, T, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    S: ImageStore,
{
    pub repo: R,
    pub ingredients: I,
    pub tags: T,
    pub images: S,
    pub limits: RecipeLimits,
}

impl<R, I, T, S> CreateRecipeUseCase<R, I, T, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    S: ImageStore,
{
    /// A freshly created recipe is neither favorited nor in anyone's cart, and
    /// nobody can follow themselves, so the view carries no flags.
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: CreateRecipeInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let write = validate_recipe(input.draft, &self.limits)?;
        let image = ImagePayload::from_data_uri(input.image.as_deref().unwrap_or_default())?;
        ensure_catalog_refs(&self.ingredients, &self.tags, &write).await?;

        let url = self.images.save(RECIPE_IMAGE_FOLDER, &image).await?;
        let id = match self.repo.create(author_id, &write, &url).await {
            Ok(id) => id,
            Err(err) => {
                discard_images(&self.images, &[url]).await;
                return Err(err);
            }
        };
        let recipe = self
            .repo
            .get(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        Ok(ViewerContext::default().recipe_view(recipe))
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeInput {
    pub draft: RecipeDraft,
    /// Base64 data URI; `None` keeps the current image.
    pub image: Option<String>,
}

pub struct UpdateRecipeUseCase<R, I, T, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    S: ImageStore,
{
    pub repo: R,
    pub ingredients: I,
    pub tags: T,
    pub images: S,
    pub limits: RecipeLimits,
}

impl<R, I, T, S> UpdateRecipeUseCase<R, I, T, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        recipe_id: i32,
        input: UpdateRecipeInput,
    ) -> Result<(), RecipesServiceError> {
        let current = self
            .repo
            .get(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if current.author.id != user_id {
            return Err(RecipesServiceError::Forbidden);
        }

        let write = validate_recipe(input.draft, &self.limits)?;
        let image = input
            .image
            .as_deref()
            .map(ImagePayload::from_data_uri)
            .transpose()?;
        ensure_catalog_refs(&self.ingredients, &self.tags, &write).await?;

        let url = match image {
            Some(image) => Some(self.images.save(RECIPE_IMAGE_FOLDER, &image).await?),
            None => None,
        };
        if let Err(err) = self.repo.update(recipe_id, &write, url.as_deref()).await {
            if let Some(url) = url {
                discard_images(&self.images, &[url]).await;
            }
            return Err(err);
        }
        if url.is_some() {
            discard_images(&self.images, &[current.image]).await;
        }
        Ok(())
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, S: ImageStore> {
    pub repo: R,
    pub images: S,
}

impl<R: RecipeRepository, S: ImageStore> DeleteRecipeUseCase<R, S> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        let recipe = self
            .repo
            .get(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if recipe.author.id != user_id {
            return Err(RecipesServiceError::Forbidden);
        }
        if !self.repo.delete(recipe_id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        discard_images(&self.images, &[recipe.image]).await;
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, F, C, S>
where
    R: RecipeRepository,
    F: RecipeRelationRepository,
    C: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    pub repo: R,
    pub favorites: F,
    pub cart: C,
    pub subscriptions: S,
}

impl<R, F, C, S> GetRecipeUseCase<R, F, C, S>
where
    R: RecipeRepository,
    F: RecipeRelationRepository,
    C: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        viewer_id: Option<Uuid>,
        recipe_id: i32,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = self
            .repo
            .get(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        let viewer = load_viewer(
            &self.favorites,
            &self.cart,
            &self.subscriptions,
            viewer_id,
            std::slice::from_ref(&recipe),
        )
        .await?;
        Ok(viewer.recipe_view(recipe))
    }
}

// ── GetRecipeSummary ─────────────────────────────────────────────────────────

/// Card shape returned after favoriting or adding to the cart.
pub struct GetRecipeSummaryUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeSummaryUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<RecipeSummary, RecipesServiceError> {
        let recipe = self
            .repo
            .get(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        Ok(RecipeSummary {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        })
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Listing query as the client states it. Relation filters are ignored for
/// anonymous viewers.
#[derive(Debug, Clone, Default)]
pub struct ListRecipesQuery {
    pub author_id: Option<Uuid>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub tag_slugs: Vec<String>,
    pub sort_by: RecipeSortBy,
    pub page: PageRequest,
}

pub struct ListRecipesUseCase<R, F, C, S>
where
    R: RecipeRepository,
    F: RecipeRelationRepository,
    C: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    pub repo: R,
    pub favorites: F,
    pub cart: C,
    pub subscriptions: S,
}

impl<R, F, C, S> ListRecipesUseCase<R, F, C, S>
where
    R: RecipeRepository,
    F: RecipeRelationRepository,
    C: RecipeRelationRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        viewer_id: Option<Uuid>,
        query: ListRecipesQuery,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let filter = RecipeFilter {
            author_id: query.author_id,
            favorited_by: viewer_id.filter(|_| query.is_favorited),
            in_cart_of: viewer_id.filter(|_| query.is_in_shopping_cart),
            tag_slugs: query.tag_slugs,
        };
        let recipes = self.repo.list(&filter, query.sort_by, query.page).await?;
        let viewer = load_viewer(
            &self.favorites,
            &self.cart,
            &self.subscriptions,
            viewer_id,
            &recipes,
        )
        .await?;
        Ok(assemble_recipe_views(recipes, &viewer))
    }
}

// ── GetRecipeLink ────────────────────────────────────────────────────────────

pub struct GetRecipeLinkUseCase<R: RecipeRepository> {
    pub repo: R,
    pub public_base_url: String,
}

impl<R: RecipeRepository> GetRecipeLinkUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<String, RecipesServiceError> {
        self.ensure_exists(recipe_id).await?;
        Ok(format!(
            "{}/r/{recipe_id}",
            self.public_base_url.trim_end_matches('/')
        ))
    }

    /// Target path of a short link.
    pub async fn resolve(&self, recipe_id: i32) -> Result<String, RecipesServiceError> {
        self.ensure_exists(recipe_id).await?;
        Ok(format!("/recipes/{recipe_id}"))
    }

    async fn ensure_exists(&self, recipe_id: i32) -> Result<(), RecipesServiceError> {
        match self.repo.author_of(recipe_id).await? {
            Some(_) => Ok(()),
            None => Err(RecipesServiceError::RecipeNotFound),
        }
    }
}
