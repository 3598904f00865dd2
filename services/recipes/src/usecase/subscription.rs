use uuid::Uuid;

use larder_domain::pagination::PageRequest;

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{SubscriptionView, User};
use crate::error::RecipesServiceError;

/// Attach recipe cards and counts to a page of authors with two queries.
async fn subscription_views<R: RecipeRepository>(
    recipes: &R,
    authors: Vec<User>,
    recipes_limit: Option<u64>,
) -> Result<Vec<SubscriptionView>, RecipesServiceError> {
    if authors.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();
    let counts = recipes.count_by_authors(&ids).await?;
    let mut cards = recipes.list_by_authors(&ids, recipes_limit).await?;
    Ok(authors
        .into_iter()
        .map(|author| SubscriptionView {
            recipes_count: counts.get(&author.id).copied().unwrap_or(0),
            recipes: cards.remove(&author.id).unwrap_or_default(),
            author,
        })
        .collect())
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<S: SubscriptionRepository> {
    pub repo: S,
}

impl<S: SubscriptionRepository> SubscribeUseCase<S> {
    pub async fn execute(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), RecipesServiceError> {
        if subscriber_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        if !self.repo.add(subscriber_id, author_id).await? {
            return Err(RecipesServiceError::AlreadySubscribed);
        }
        Ok(())
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<S: SubscriptionRepository> {
    pub repo: S,
}

impl<S: SubscriptionRepository> UnsubscribeUseCase<S> {
    pub async fn execute(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), RecipesServiceError> {
        if !self.repo.remove(subscriber_id, author_id).await? {
            return Err(RecipesServiceError::NotSubscribed);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository, R: RecipeRepository> {
    pub repo: S,
    pub recipes: R,
}

impl<S: SubscriptionRepository, R: RecipeRepository> ListSubscriptionsUseCase<S, R> {
    /// Followed authors, each with at most `recipes_limit` of their newest recipes.
    pub async fn execute(
        &self,
        subscriber_id: Uuid,
        recipes_limit: Option<u64>,
        page: PageRequest,
    ) -> Result<Vec<SubscriptionView>, RecipesServiceError> {
        let authors = self.repo.list_authors(subscriber_id, page).await?;
        subscription_views(&self.recipes, authors, recipes_limit).await
    }
}

// ── GetSubscription ──────────────────────────────────────────────────────────

/// One followed author in the listing shape, returned after subscribing.
pub struct GetSubscriptionUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> GetSubscriptionUseCase<U, R> {
    pub async fn execute(
        &self,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<SubscriptionView, RecipesServiceError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        subscription_views(&self.recipes, vec![author], recipes_limit)
            .await?
            .pop()
            .ok_or(RecipesServiceError::UserNotFound)
    }
}
