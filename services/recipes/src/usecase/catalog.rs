use std::collections::HashSet;

use larder_domain::pagination::PageRequest;
use larder_domain::tag::{TAG_NAME_MAX_LEN, TagColor, validate_slug};

use crate::domain::repository::{IngredientRepository, TagRepository};
use crate::domain::types::{Ingredient, NewIngredient, NewTag, Tag};
use crate::error::RecipesServiceError;

// ── Tags ─────────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

pub struct GetTagUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── Ingredients ──────────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    pub async fn execute(
        &self,
        name_prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.repo.search(prefix, page).await
    }
}

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── Bulk import ──────────────────────────────────────────────────────────────

/// Result of a bulk import: rows read vs rows actually inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub read: usize,
    pub inserted: u64,
}

pub struct ImportIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> ImportIngredientsUseCase<I> {
    /// Trim and de-duplicate rows, then insert the ones the catalog lacks.
    pub async fn execute(
        &self,
        rows: Vec<NewIngredient>,
    ) -> Result<ImportSummary, RecipesServiceError> {
        let read = rows.len();
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(read);
        for row in rows {
            let row = NewIngredient {
                name: row.name.trim().to_owned(),
                measurement_unit: row.measurement_unit.trim().to_owned(),
            };
            if row.name.is_empty() || row.measurement_unit.is_empty() {
                return Err(RecipesServiceError::MissingData);
            }
            if seen.insert(row.clone()) {
                cleaned.push(row);
            }
        }
        let inserted = self.repo.insert_missing(&cleaned).await?;
        Ok(ImportSummary { read, inserted })
    }
}

/// Tag row before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub struct ImportTagsUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> ImportTagsUseCase<T> {
    pub async fn execute(&self, rows: Vec<TagDraft>) -> Result<ImportSummary, RecipesServiceError> {
        let read = rows.len();
        let tags = rows
            .into_iter()
            .map(|row| {
                let name = row.name.trim().to_owned();
                if name.is_empty() || name.chars().count() > TAG_NAME_MAX_LEN {
                    return Err(RecipesServiceError::InvalidName);
                }
                let color: TagColor = row
                    .color
                    .trim()
                    .parse()
                    .map_err(|_| RecipesServiceError::MissingData)?;
                let slug = row.slug.trim().to_owned();
                if !validate_slug(&slug) {
                    return Err(RecipesServiceError::MissingData);
                }
                Ok(NewTag { name, color, slug })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self.repo.insert_missing(&tags).await?;
        Ok(ImportSummary { read, inserted })
    }
}
