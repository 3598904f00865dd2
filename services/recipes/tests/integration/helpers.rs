use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use larder_domain::pagination::{PageRequest, Sort};
use larder_domain::recipe::{RecipeLimits, RecipeSortBy};
use larder_recipes::domain::image::ImagePayload;
use larder_recipes::domain::repository::{
    ImageStore, IngredientRepository, RecipeRelation, RecipeRelationRepository, RecipeRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use larder_recipes::domain::types::{
    CartLine, Ingredient, IngredientAmount, NewIngredient, NewTag, Recipe, RecipeFilter,
    RecipeSummary, RecipeWrite, Tag, User,
};
use larder_recipes::domain::validation::{IngredientLineDraft, RecipeDraft};
use larder_recipes::error::RecipesServiceError;
use larder_recipes::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesUseCase,
};
use larder_recipes::usecase::user::DeleteUserUseCase;

pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StoredRecipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i16,
    pub pub_date: DateTime<Utc>,
    pub lines: Vec<(i32, i16)>,
    pub tag_ids: Vec<i32>,
}

/// Tables mirrored from the migrations, with the same cascades.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub ingredients: Vec<Ingredient>,
    pub tags: Vec<Tag>,
    pub recipes: Vec<StoredRecipe>,
    pub favorites: Vec<(Uuid, i32)>,
    pub cart: Vec<(Uuid, i32)>,
    /// (subscriber, author), oldest first.
    pub subscriptions: Vec<(Uuid, Uuid)>,
    /// Image URLs currently held by the image store.
    pub images: Vec<String>,
    images_saved: usize,
    seq: i64,
}

impl Tables {
    fn next_seq(&mut self) -> i64 {
        self.seq += 1;
        self.seq
    }

    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn recipe_exists(&self, id: i32) -> bool {
        self.recipes.iter().any(|r| r.id == id)
    }

    fn delete_recipe_rows(&mut self, ids: &HashSet<i32>) {
        self.recipes.retain(|r| !ids.contains(&r.id));
        self.favorites.retain(|(_, r)| !ids.contains(r));
        self.cart.retain(|(_, r)| !ids.contains(r));
    }

    fn hydrate(&self, stored: &StoredRecipe) -> Recipe {
        let author = self
            .users
            .iter()
            .find(|u| u.id == stored.author_id)
            .cloned()
            .expect("recipe author exists");
        let mut ingredients: Vec<IngredientAmount> = stored
            .lines
            .iter()
            .map(|(ingredient_id, amount)| IngredientAmount {
                ingredient: self
                    .ingredients
                    .iter()
                    .find(|i| i.id == *ingredient_id)
                    .cloned()
                    .expect("ingredient exists"),
                amount: *amount,
            })
            .collect();
        ingredients.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));
        let mut tags: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| stored.tag_ids.contains(&t.id))
            .cloned()
            .collect();
        tags.sort_by_key(|t| t.id);
        Recipe {
            id: stored.id,
            author,
            name: stored.name.clone(),
            text: stored.text.clone(),
            image: stored.image.clone(),
            cooking_time: stored.cooking_time,
            pub_date: stored.pub_date,
            tags,
            ingredients,
        }
    }
}

fn page_slice<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let page = page.clamped();
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect()
}

/// Shared handle over the tables. Each accessor returns a repository view.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub tables: Arc<Mutex<Tables>>,
}

macro_rules! repo_view {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Clone)]
            pub struct $name(pub Arc<Mutex<Tables>>);
        )*
    };
}

repo_view!(
    MemUsers,
    MemIngredients,
    MemTags,
    MemRecipes,
    MemFavorites,
    MemCart,
    MemSubscriptions,
    MemImages,
);

impl MemoryStore {
    pub fn users(&self) -> MemUsers {
        MemUsers(Arc::clone(&self.tables))
    }
    pub fn ingredients(&self) -> MemIngredients {
        MemIngredients(Arc::clone(&self.tables))
    }
    pub fn tags(&self) -> MemTags {
        MemTags(Arc::clone(&self.tables))
    }
    pub fn recipes(&self) -> MemRecipes {
        MemRecipes(Arc::clone(&self.tables))
    }
    pub fn favorites(&self) -> MemFavorites {
        MemFavorites(Arc::clone(&self.tables))
    }
    pub fn cart(&self) -> MemCart {
        MemCart(Arc::clone(&self.tables))
    }
    pub fn subscriptions(&self) -> MemSubscriptions {
        MemSubscriptions(Arc::clone(&self.tables))
    }
    pub fn images(&self) -> MemImages {
        MemImages(Arc::clone(&self.tables))
    }

    pub fn with<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.tables.lock().unwrap())
    }

    // ── Seeding ──

    pub fn seed_user(&self, username: &str) -> User {
        let mut t = self.tables.lock().unwrap();
        let user = User {
            id: Uuid::now_v7(),
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "Cook".to_owned(),
            avatar: None,
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn seed_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut t = self.tables.lock().unwrap();
        let ingredient = Ingredient {
            id: t.ingredients.len() as i32 + 1,
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        t.ingredients.push(ingredient.clone());
        ingredient
    }

    pub fn seed_tag(&self, name: &str, color: &str, slug: &str) -> Tag {
        let mut t = self.tables.lock().unwrap();
        let tag = Tag {
            id: t.tags.len() as i32 + 1,
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        };
        t.tags.push(tag.clone());
        tag
    }
}

// ── UserRepository ───────────────────────────────────────────────────────────

impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let mut users = t.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(page_slice(users, page))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        if t.users.iter().any(|u| {
            u.id == user.id || u.email == user.email || u.username == user.username
        }) {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        t.users.push(user.clone());
        Ok(())
    }

    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<&str>,
    ) -> Result<bool, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        match t.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.avatar = avatar.map(str::to_owned);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        if !t.user_exists(id) {
            return Ok(false);
        }
        t.users.retain(|u| u.id != id);
        let owned: HashSet<i32> = t
            .recipes
            .iter()
            .filter(|r| r.author_id == id)
            .map(|r| r.id)
            .collect();
        t.delete_recipe_rows(&owned);
        t.favorites.retain(|(u, _)| *u != id);
        t.cart.retain(|(u, _)| *u != id);
        t.subscriptions.retain(|(s, a)| *s != id && *a != id);
        Ok(true)
    }
}

// ── IngredientRepository ─────────────────────────────────────────────────────

impl IngredientRepository for MemIngredients {
    async fn search(
        &self,
        name_prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = t
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
        });
        Ok(page_slice(found, page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn insert_missing(&self, rows: &[NewIngredient]) -> Result<u64, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        let mut inserted = 0;
        for row in rows {
            let exists = t
                .ingredients
                .iter()
                .any(|i| i.name == row.name && i.measurement_unit == row.measurement_unit);
            if !exists {
                let id = t.ingredients.len() as i32 + 1;
                t.ingredients.push(Ingredient {
                    id,
                    name: row.name.clone(),
                    measurement_unit: row.measurement_unit.clone(),
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

// ── TagRepository ────────────────────────────────────────────────────────────

impl TagRepository for MemTags {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let mut tags = t.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.tags.iter().find(|tag| tag.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.tags.iter().filter(|tag| ids.contains(&tag.id)).cloned().collect())
    }

    async fn insert_missing(&self, rows: &[NewTag]) -> Result<u64, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        let mut inserted = 0;
        for row in rows {
            let color = row.color.to_string();
            let collides = t
                .tags
                .iter()
                .any(|tag| tag.name == row.name || tag.color == color || tag.slug == row.slug);
            if !collides {
                let id = t.tags.len() as i32 + 1;
                t.tags.push(Tag {
                    id,
                    name: row.name.clone(),
                    color,
                    slug: row.slug.clone(),
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

// ── RecipeRepository ─────────────────────────────────────────────────────────

impl RecipeRepository for MemRecipes {
    async fn list(
        &self,
        filter: &RecipeFilter,
        sort_by: RecipeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let slug_tag_ids: HashSet<i32> = t
            .tags
            .iter()
            .filter(|tag| filter.tag_slugs.contains(&tag.slug))
            .map(|tag| tag.id)
            .collect();
        let mut matched: Vec<&StoredRecipe> = t
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| t.favorites.contains(&(u, r.id)))
            })
            .filter(|r| filter.in_cart_of.is_none_or(|u| t.cart.contains(&(u, r.id))))
            .filter(|r| {
                filter.tag_slugs.is_empty() || r.tag_ids.iter().any(|id| slug_tag_ids.contains(id))
            })
            .collect();
        matched.sort_by(|a, b| match sort_by {
            RecipeSortBy::PublishedAt(Sort::Desc) => {
                b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id))
            }
            RecipeSortBy::PublishedAt(Sort::Asc) => {
                a.pub_date.cmp(&b.pub_date).then(a.id.cmp(&b.id))
            }
            RecipeSortBy::Name(Sort::Asc) => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
            RecipeSortBy::Name(Sort::Desc) => b.name.cmp(&a.name).then(b.id.cmp(&a.id)),
        });
        let recipes = matched.into_iter().map(|r| t.hydrate(r)).collect();
        Ok(page_slice(recipes, page))
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.recipes.iter().find(|r| r.id == id).map(|r| t.hydrate(r)))
    }

    async fn author_of(&self, id: i32) -> Result<Option<Uuid>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.recipes.iter().find(|r| r.id == id).map(|r| r.author_id))
    }

    async fn create(
        &self,
        author_id: Uuid,
        write: &RecipeWrite,
        image: &str,
    ) -> Result<i32, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        if !t.user_exists(author_id) {
            return Err(RecipesServiceError::UserNotFound);
        }
        let seq = t.next_seq();
        let id = t.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        t.recipes.push(StoredRecipe {
            id,
            author_id,
            name: write.name.clone(),
            text: write.text.clone(),
            image: image.to_owned(),
            cooking_time: write.cooking_time,
            pub_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seq),
            lines: write
                .ingredients
                .iter()
                .map(|l| (l.ingredient_id, l.amount))
                .collect(),
            tag_ids: write.tag_ids.clone(),
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: i32,
        write: &RecipeWrite,
        image: Option<&str>,
    ) -> Result<(), RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        let stored = t
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        stored.name = write.name.clone();
        stored.text = write.text.clone();
        stored.cooking_time = write.cooking_time;
        if let Some(image) = image {
            stored.image = image.to_owned();
        }
        stored.lines = write
            .ingredients
            .iter()
            .map(|l| (l.ingredient_id, l.amount))
            .collect();
        stored.tag_ids = write.tag_ids.clone();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        if !t.recipe_exists(id) {
            return Ok(false);
        }
        t.delete_recipe_rows(&HashSet::from([id]));
        Ok(true)
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let mut own: Vec<&StoredRecipe> = t
            .recipes
            .iter()
            .filter(|r| author_ids.contains(&r.author_id))
            .collect();
        own.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        let cap = limit.map_or(usize::MAX, |l| l as usize);
        let mut by_author: HashMap<Uuid, Vec<RecipeSummary>> = HashMap::new();
        for r in own {
            let cards = by_author.entry(r.author_id).or_default();
            if cards.len() < cap {
                cards.push(RecipeSummary {
                    id: r.id,
                    name: r.name.clone(),
                    image: r.image.clone(),
                    cooking_time: r.cooking_time,
                });
            }
        }
        Ok(by_author)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let mut counts = HashMap::new();
        for recipe in t.recipes.iter().filter(|r| author_ids.contains(&r.author_id)) {
            *counts.entry(recipe.author_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn images_by_author(&self, author_id: Uuid) -> Result<Vec<String>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .map(|r| r.image.clone())
            .collect())
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let mut lines = Vec::new();
        for (_, recipe_id) in t.cart.iter().filter(|(u, _)| *u == user_id) {
            let Some(recipe) = t.recipes.iter().find(|r| r.id == *recipe_id) else {
                continue;
            };
            for (ingredient_id, amount) in &recipe.lines {
                let Some(ingredient) = t.ingredients.iter().find(|i| i.id == *ingredient_id)
                else {
                    continue;
                };
                lines.push(CartLine {
                    recipe_id: recipe.id,
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    measurement_unit: ingredient.measurement_unit.clone(),
                    amount: *amount,
                });
            }
        }
        Ok(lines)
    }
}

// ── RecipeRelationRepository ─────────────────────────────────────────────────

fn relation_rows(t: &mut Tables, relation: RecipeRelation) -> &mut Vec<(Uuid, i32)> {
    match relation {
        RecipeRelation::Favorite => &mut t.favorites,
        RecipeRelation::ShoppingCart => &mut t.cart,
    }
}

fn relation_add(
    tables: &Mutex<Tables>,
    relation: RecipeRelation,
    user_id: Uuid,
    recipe_id: i32,
) -> Result<bool, RecipesServiceError> {
    let mut t = tables.lock().unwrap();
    if !t.recipe_exists(recipe_id) {
        return Err(RecipesServiceError::RecipeNotFound);
    }
    if !t.user_exists(user_id) {
        return Err(RecipesServiceError::UserNotFound);
    }
    let rows = relation_rows(&mut t, relation);
    if rows.contains(&(user_id, recipe_id)) {
        return Ok(false);
    }
    rows.push((user_id, recipe_id));
    Ok(true)
}

fn relation_remove(
    tables: &Mutex<Tables>,
    relation: RecipeRelation,
    user_id: Uuid,
    recipe_id: i32,
) -> bool {
    let mut t = tables.lock().unwrap();
    let rows = relation_rows(&mut t, relation);
    let before = rows.len();
    rows.retain(|pair| *pair != (user_id, recipe_id));
    rows.len() != before
}

fn relation_filter(
    tables: &Mutex<Tables>,
    relation: RecipeRelation,
    user_id: Uuid,
    recipe_ids: &[i32],
) -> HashSet<i32> {
    let mut t = tables.lock().unwrap();
    relation_rows(&mut t, relation)
        .iter()
        .filter(|(u, r)| *u == user_id && recipe_ids.contains(r))
        .map(|(_, r)| *r)
        .collect()
}

impl RecipeRelationRepository for MemFavorites {
    fn relation(&self) -> RecipeRelation {
        RecipeRelation::Favorite
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        relation_add(&self.0, self.relation(), user_id, recipe_id)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(relation_remove(&self.0, self.relation(), user_id, recipe_id))
    }

    async fn filter_existing(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        Ok(relation_filter(&self.0, self.relation(), user_id, recipe_ids))
    }
}

impl RecipeRelationRepository for MemCart {
    fn relation(&self) -> RecipeRelation {
        RecipeRelation::ShoppingCart
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        relation_add(&self.0, self.relation(), user_id, recipe_id)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(relation_remove(&self.0, self.relation(), user_id, recipe_id))
    }

    async fn filter_existing(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        Ok(relation_filter(&self.0, self.relation(), user_id, recipe_ids))
    }
}

// ── SubscriptionRepository ───────────────────────────────────────────────────

impl SubscriptionRepository for MemSubscriptions {
    async fn add(&self, subscriber_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        if !t.user_exists(subscriber_id) || !t.user_exists(author_id) {
            return Err(RecipesServiceError::UserNotFound);
        }
        if t.subscriptions.contains(&(subscriber_id, author_id)) {
            return Ok(false);
        }
        t.subscriptions.push((subscriber_id, author_id));
        Ok(true)
    }

    async fn remove(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        let before = t.subscriptions.len();
        t.subscriptions
            .retain(|pair| *pair != (subscriber_id, author_id));
        Ok(t.subscriptions.len() != before)
    }

    async fn list_authors(
        &self,
        subscriber_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        let authors: Vec<User> = t
            .subscriptions
            .iter()
            .rev()
            .filter(|(s, _)| *s == subscriber_id)
            .filter_map(|(_, a)| t.users.iter().find(|u| u.id == *a).cloned())
            .collect();
        Ok(page_slice(authors, page))
    }

    async fn subscribed_among(
        &self,
        subscriber_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let t = self.0.lock().unwrap();
        Ok(t.subscriptions
            .iter()
            .filter(|(s, a)| *s == subscriber_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }
}

// ── ImageStore ───────────────────────────────────────────────────────────────

impl ImageStore for MemImages {
    async fn save(&self, folder: &str, image: &ImagePayload) -> Result<String, RecipesServiceError> {
        let mut t = self.0.lock().unwrap();
        t.images_saved += 1;
        let url = format!("/media/{folder}/{}.{}", t.images_saved, image.extension);
        t.images.push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), RecipesServiceError> {
        self.0.lock().unwrap().images.retain(|u| u != url);
        Ok(())
    }
}

// ── Use case builders ────────────────────────────────────────────────────────

pub fn create_recipe_uc(
    store: &MemoryStore,
) -> CreateRecipeUseCase<MemRecipes, MemIngredients, MemTags, MemImages> {
    CreateRecipeUseCase {
        repo: store.recipes(),
        ingredients: store.ingredients(),
        tags: store.tags(),
        images: store.images(),
        limits: RecipeLimits::default(),
    }
}

pub fn get_recipe_uc(
    store: &MemoryStore,
) -> GetRecipeUseCase<MemRecipes, MemFavorites, MemCart, MemSubscriptions> {
    GetRecipeUseCase {
        repo: store.recipes(),
        favorites: store.favorites(),
        cart: store.cart(),
        subscriptions: store.subscriptions(),
    }
}

pub fn list_recipes_uc(
    store: &MemoryStore,
) -> ListRecipesUseCase<MemRecipes, MemFavorites, MemCart, MemSubscriptions> {
    ListRecipesUseCase {
        repo: store.recipes(),
        favorites: store.favorites(),
        cart: store.cart(),
        subscriptions: store.subscriptions(),
    }
}

pub fn delete_recipe_uc(store: &MemoryStore) -> DeleteRecipeUseCase<MemRecipes, MemImages> {
    DeleteRecipeUseCase {
        repo: store.recipes(),
        images: store.images(),
    }
}

pub fn delete_user_uc(store: &MemoryStore) -> DeleteUserUseCase<MemUsers, MemRecipes, MemImages> {
    DeleteUserUseCase {
        repo: store.users(),
        recipes: store.recipes(),
        images: store.images(),
    }
}

/// Draft with the given `(ingredient_id, amount)` lines and tag ids.
pub fn draft(name: &str, lines: &[(i32, i32)], tag_ids: &[i32]) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        text: format!("How to make {name}."),
        cooking_time: 30,
        ingredients: lines
            .iter()
            .map(|(ingredient_id, amount)| IngredientLineDraft {
                ingredient_id: *ingredient_id,
                amount: *amount,
            })
            .collect(),
        tag_ids: tag_ids.to_vec(),
    }
}

/// Create a recipe through the use case and return its id.
pub async fn publish(
    store: &MemoryStore,
    author: &User,
    name: &str,
    lines: &[(i32, i32)],
    tag_ids: &[i32],
) -> i32 {
    create_recipe_uc(store)
        .execute(
            author.id,
            CreateRecipeInput {
                draft: draft(name, lines, tag_ids),
                image: Some(PNG_DATA_URI.to_owned()),
            },
        )
        .await
        .unwrap()
        .recipe
        .id
}
