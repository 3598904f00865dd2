use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    TransactionTrait,
    sea_query::{Expr, OnConflict, Query, SelectStatement, extension::postgres::PgExpr},
};
use uuid::Uuid;

use larder_core::sea_ext::{ConstraintViolation, DbErrExt, flatten_transaction_error};
use larder_domain::pagination::{PageRequest, Sort};
use larder_domain::recipe::RecipeSortBy;
use larder_recipes_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_cart_entries,
    subscriptions, tags, users,
};

use crate::domain::repository::{
    IngredientRepository, RecipeRelation, RecipeRelationRepository, RecipeRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    CartLine, Ingredient, IngredientAmount, NewIngredient, NewTag, Recipe, RecipeFilter,
    RecipeSummary, RecipeWrite, Tag, User,
};
use crate::error::RecipesServiceError;

/// Postgres caps bind parameters per statement; bulk inserts go in chunks.
const INSERT_CHUNK: usize = 1000;

fn internal(err: DbErr, context: &'static str) -> RecipesServiceError {
    RecipesServiceError::Internal(anyhow::Error::new(err).context(context))
}

/// Map a rejected insert. `Ok(())` means the row already existed.
fn classify_insert(
    err: DbErr,
    context: &'static str,
    on_foreign_key: impl FnOnce(&str) -> RecipesServiceError,
) -> Result<(), RecipesServiceError> {
    match err.constraint_violation() {
        Some(ConstraintViolation::Unique(_)) => Ok(()),
        Some(ConstraintViolation::ForeignKey(msg)) => Err(on_foreign_key(&msg)),
        None => Err(internal(err, context)),
    }
}

/// Foreign-key names are `fk_<table>_<column>`; pick the missing side by column.
fn missing_user_or_recipe(msg: &str) -> RecipesServiceError {
    if msg.contains("recipe_id") {
        RecipesServiceError::RecipeNotFound
    } else {
        RecipesServiceError::UserNotFound
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let result = users::Entity::insert(users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            avatar: Set(user.avatar.clone()),
            created_at: Set(user.created_at),
        })
        .exec_without_returning(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_unique_violation() => Err(RecipesServiceError::UserAlreadyExists),
            Err(e) => Err(internal(e, "create user")),
        }
    }

    async fn set_avatar(
        &self,
        id: Uuid,
        avatar: Option<&str>,
    ) -> Result<bool, RecipesServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Avatar, Expr::value(avatar.map(str::to_owned)))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set user avatar")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(
        &self,
        name_prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let page = page.clamped();
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(
                Expr::col((ingredients::Entity, ingredients::Column::Name))
                    .ilike(like_prefix(prefix)),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn insert_missing(&self, rows: &[NewIngredient]) -> Result<u64, RecipesServiceError> {
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|row| ingredients::ActiveModel {
                name: Set(row.name.clone()),
                measurement_unit: Set(row.measurement_unit.clone()),
                ..Default::default()
            });
            inserted += ingredients::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        ingredients::Column::Name,
                        ingredients::Column::MeasurementUnit,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .context("insert ingredients")?;
        }
        Ok(inserted)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn insert_missing(&self, rows: &[NewTag]) -> Result<u64, RecipesServiceError> {
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            let models = chunk.iter().map(|row| tags::ActiveModel {
                name: Set(row.name.clone()),
                color: Set(row.color.to_string()),
                slug: Set(row.slug.clone()),
                ..Default::default()
            });
            // Any of name, color or slug may collide; skip the row in every case.
            inserted += tags::Entity::insert_many(models)
                .on_conflict(OnConflict::new().do_nothing().to_owned())
                .exec_without_returning(&self.db)
                .await
                .context("insert tags")?;
        }
        Ok(inserted)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

/// `SELECT recipe_id FROM <table> WHERE user_id = $1` for favorites and cart filters.
fn recipe_ids_of_user<E, C>(table: E, recipe_col: C, user_col: C, user_id: Uuid) -> SelectStatement
where
    E: EntityTrait,
    C: ColumnTrait,
{
    Query::select()
        .column(recipe_col)
        .from(table)
        .and_where(user_col.eq(user_id))
        .to_owned()
}

impl DbRecipeRepository {
    /// Attach tags and ingredient lines to a page of (recipe, author) rows, keeping order.
    async fn hydrate<C: ConnectionTrait>(
        db: &C,
        rows: Vec<(recipes::Model, Option<users::Model>)>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = rows.iter().map(|(r, _)| r.id).collect();

        let lines = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .all(db)
            .await
            .context("load recipe ingredients")?;
        let mut lines_by_recipe: HashMap<i32, Vec<IngredientAmount>> = HashMap::new();
        for (line, ingredient) in lines {
            let ingredient = ingredient.context("recipe ingredient without catalog row")?;
            lines_by_recipe
                .entry(line.recipe_id)
                .or_default()
                .push(IngredientAmount {
                    ingredient: ingredient_from_model(ingredient),
                    amount: line.amount,
                });
        }

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
            .find_also_related(tags::Entity)
            .all(db)
            .await
            .context("load recipe tags")?;
        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }

        let mut recipes = Vec::with_capacity(rows.len());
        for (recipe, author) in rows {
            let author = author.context("recipe without author")?;
            let mut ingredients = lines_by_recipe.remove(&recipe.id).unwrap_or_default();
            ingredients.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));
            let mut tags = tags_by_recipe.remove(&recipe.id).unwrap_or_default();
            tags.sort_by_key(|t| t.id);
            recipes.push(Recipe {
                id: recipe.id,
                author: user_from_model(author),
                name: recipe.name,
                text: recipe.text,
                image: recipe.image,
                cooking_time: recipe.cooking_time,
                pub_date: recipe.pub_date,
                tags,
                ingredients,
            });
        }
        Ok(recipes)
    }

    async fn insert_links<C: ConnectionTrait>(
        db: &C,
        recipe_id: i32,
        write: &RecipeWrite,
    ) -> Result<(), DbErr> {
        recipe_ingredients::Entity::insert_many(write.ingredients.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
            }
        }))
        .exec_without_returning(db)
        .await?;
        if !write.tag_ids.is_empty() {
            recipe_tags::Entity::insert_many(write.tag_ids.iter().map(|tag_id| {
                recipe_tags::ActiveModel {
                    recipe_id: Set(recipe_id),
                    tag_id: Set(*tag_id),
                }
            }))
            .exec_without_returning(db)
            .await?;
        }
        Ok(())
    }
}

/// `SELECT author_id, COUNT(recipes.id) ... GROUP BY author_id`.
fn count_by_authors_query(author_ids: &[Uuid]) -> Select<recipes::Entity> {
    recipes::Entity::find()
        .select_only()
        .column(recipes::Column::AuthorId)
        .column_as(
            Expr::col((recipes::Entity, recipes::Column::Id)).count(),
            "recipes_count",
        )
        .filter(recipes::Column::AuthorId.is_in(author_ids.iter().copied()))
        .group_by(recipes::Column::AuthorId)
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        sort_by: RecipeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let page = page.clamped();
        let mut query = recipes::Entity::find().find_also_related(users::Entity);
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(recipes::Column::Id.in_subquery(recipe_ids_of_user(
                favorites::Entity,
                favorites::Column::RecipeId,
                favorites::Column::UserId,
                user_id,
            )));
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(recipes::Column::Id.in_subquery(recipe_ids_of_user(
                shopping_cart_entries::Entity,
                shopping_cart_entries::Column::RecipeId,
                shopping_cart_entries::Column::UserId,
                user_id,
            )));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_tags::Column::RecipeId)
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(tags::Column::Slug.is_in(filter.tag_slugs.iter().cloned()))
                        .to_owned(),
                ),
            );
        }
        query = match sort_by {
            RecipeSortBy::PublishedAt(Sort::Desc) => query
                .order_by_desc(recipes::Column::PubDate)
                .order_by_desc(recipes::Column::Id),
            RecipeSortBy::PublishedAt(Sort::Asc) => query
                .order_by_asc(recipes::Column::PubDate)
                .order_by_asc(recipes::Column::Id),
            RecipeSortBy::Name(Sort::Asc) => query
                .order_by_asc(recipes::Column::Name)
                .order_by_asc(recipes::Column::Id),
            RecipeSortBy::Name(Sort::Desc) => query
                .order_by_desc(recipes::Column::Name)
                .order_by_desc(recipes::Column::Id),
        };
        let rows = query
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        Self::hydrate(&self.db, rows).await
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(row) = recipes::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(Self::hydrate(&self.db, vec![row]).await?.pop())
    }

    async fn author_of(&self, id: i32) -> Result<Option<Uuid>, RecipesServiceError> {
        let author = recipes::Entity::find_by_id(id)
            .select_only()
            .column(recipes::Column::AuthorId)
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .context("find recipe author")?;
        Ok(author)
    }

    async fn create(
        &self,
        author_id: Uuid,
        write: &RecipeWrite,
        image: &str,
    ) -> Result<i32, RecipesServiceError> {
        let write = write.clone();
        let image = image.to_owned();
        let result = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(write.name.clone()),
                        text: Set(write.text.clone()),
                        image: Set(image),
                        cooking_time: Set(write.cooking_time),
                        pub_date: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Self::insert_links(txn, recipe.id, &write).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .map_err(flatten_transaction_error);
        match result {
            Ok(id) => Ok(id),
            // The principal has no profile row yet.
            Err(e) if e.is_foreign_key_violation() => Err(RecipesServiceError::UserNotFound),
            Err(e) => Err(internal(e, "create recipe")),
        }
    }

    async fn update(
        &self,
        id: i32,
        write: &RecipeWrite,
        image: Option<&str>,
    ) -> Result<(), RecipesServiceError> {
        let write = write.clone();
        let image = image.map(str::to_owned);
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Set(id),
                        name: Set(write.name.clone()),
                        text: Set(write.text.clone()),
                        cooking_time: Set(write.cooking_time),
                        ..Default::default()
                    };
                    if let Some(image) = image {
                        am.image = Set(image);
                    }
                    am.update(txn).await?;

                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    Self::insert_links(txn, id, &write).await
                })
            })
            .await
            .map_err(flatten_transaction_error);
        match result {
            Ok(()) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(RecipesServiceError::RecipeNotFound),
            Err(e) => Err(internal(e, "update recipe")),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: Option<u64>,
    ) -> Result<HashMap<Uuid, Vec<RecipeSummary>>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.is_in(author_ids.iter().copied()))
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes by authors")?;
        let cap = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        let mut by_author: HashMap<Uuid, Vec<RecipeSummary>> = HashMap::new();
        for m in models {
            let cards = by_author.entry(m.author_id).or_default();
            if cards.len() < cap {
                cards.push(RecipeSummary {
                    id: m.id,
                    name: m.name,
                    image: m.image,
                    cooking_time: m.cooking_time,
                });
            }
        }
        Ok(by_author)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = count_by_authors_query(author_ids)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(rows
            .into_iter()
            .map(|(author_id, count)| (author_id, count.max(0) as u64))
            .collect())
    }

    async fn images_by_author(&self, author_id: Uuid) -> Result<Vec<String>, RecipesServiceError> {
        let images = recipes::Entity::find()
            .select_only()
            .column(recipes::Column::Image)
            .filter(recipes::Column::AuthorId.eq(author_id))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("list recipe images by author")?;
        Ok(images)
    }

    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, RecipesServiceError> {
        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(recipe_ingredients::Column::RecipeId)
            .column(recipe_ingredients::Column::IngredientId)
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .join(
                JoinType::InnerJoin,
                recipe_ingredients::Relation::Ingredient.def(),
            )
            .filter(
                recipe_ingredients::Column::RecipeId.in_subquery(recipe_ids_of_user(
                    shopping_cart_entries::Entity,
                    shopping_cart_entries::Column::RecipeId,
                    shopping_cart_entries::Column::UserId,
                    user_id,
                )),
            )
            .into_tuple::<(i32, i32, String, String, i16)>()
            .all(&self.db)
            .await
            .context("load shopping cart lines")?;
        Ok(rows
            .into_iter()
            .map(
                |(recipe_id, ingredient_id, name, measurement_unit, amount)| CartLine {
                    recipe_id,
                    ingredient_id,
                    name,
                    measurement_unit,
                    amount,
                },
            )
            .collect())
    }
}

// ── Favorite / shopping cart repositories ────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl RecipeRelationRepository for DbFavoriteRepository {
    fn relation(&self) -> RecipeRelation {
        RecipeRelation::Favorite
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .exec_without_returning(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => classify_insert(e, "add favorite", missing_user_or_recipe).map(|()| false),
        }
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("remove favorite")?;
        Ok(result.rows_affected > 0)
    }

    async fn filter_existing(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = favorites::Entity::find()
            .select_only()
            .column(favorites::Column::RecipeId)
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("filter favorited recipes")?;
        Ok(ids.into_iter().collect())
    }
}

#[derive(Clone)]
pub struct DbShoppingCartRepository {
    pub db: DatabaseConnection,
}

impl RecipeRelationRepository for DbShoppingCartRepository {
    fn relation(&self) -> RecipeRelation {
        RecipeRelation::ShoppingCart
    }

    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = shopping_cart_entries::Entity::insert(shopping_cart_entries::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .exec_without_returning(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                classify_insert(e, "add to shopping cart", missing_user_or_recipe).map(|()| false)
            }
        }
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = shopping_cart_entries::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("remove from shopping cart")?;
        Ok(result.rows_affected > 0)
    }

    async fn filter_existing(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = shopping_cart_entries::Entity::find()
            .select_only()
            .column(shopping_cart_entries::Column::RecipeId)
            .filter(shopping_cart_entries::Column::UserId.eq(user_id))
            .filter(shopping_cart_entries::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("filter recipes in shopping cart")?;
        Ok(ids.into_iter().collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn add(&self, subscriber_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = subscriptions::Entity::insert(subscriptions::ActiveModel {
            subscriber_id: Set(subscriber_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .exec_without_returning(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => classify_insert(e, "add subscription", |_| {
                RecipesServiceError::UserNotFound
            })
            .map(|()| false),
        }
    }

    async fn remove(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let result = subscriptions::Entity::delete_by_id((subscriber_id, author_id))
            .exec(&self.db)
            .await
            .context("remove subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_authors(
        &self,
        subscriber_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .join_rev(
                JoinType::InnerJoin,
                subscriptions::Relation::Author.def(),
            )
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list subscribed authors")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn subscribed_among(
        &self,
        subscriber_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::AuthorId)
            .filter(subscriptions::Column::SubscriberId.eq(subscriber_id))
            .filter(subscriptions::Column::AuthorId.is_in(author_ids.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("filter subscribed authors")?;
        Ok(ids.into_iter().collect())
    }
}
