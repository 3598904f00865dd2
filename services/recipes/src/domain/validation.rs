use std::collections::HashSet;

use larder_domain::recipe::{RECIPE_NAME_MAX_LEN, RecipeLimits};

use crate::domain::types::{RecipeIngredientLine, RecipeWrite};
use crate::error::RecipesServiceError;

/// Unvalidated ingredient line as received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLineDraft {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Unvalidated recipe fields as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientLineDraft>,
    pub tag_ids: Vec<i32>,
}

/// Check the shape of a recipe write. Existence of the referenced ingredients
/// and tags is checked separately against the catalog.
pub fn validate_recipe(
    draft: RecipeDraft,
    limits: &RecipeLimits,
) -> Result<RecipeWrite, RecipesServiceError> {
    let name = draft.name.trim();
    if name.is_empty() || name.chars().count() > RECIPE_NAME_MAX_LEN {
        return Err(RecipesServiceError::InvalidName);
    }
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(RecipesServiceError::MissingText);
    }
    if !limits.accepts_cooking_time(draft.cooking_time) {
        return Err(RecipesServiceError::CookingTimeOutOfRange);
    }
    if draft.ingredients.is_empty() {
        return Err(RecipesServiceError::MissingIngredients);
    }

    let mut seen = HashSet::with_capacity(draft.ingredients.len());
    let mut ingredients = Vec::with_capacity(draft.ingredients.len());
    for line in &draft.ingredients {
        if !seen.insert(line.ingredient_id) {
            return Err(RecipesServiceError::DuplicateIngredient);
        }
        let amount = i16::try_from(line.amount)
            .ok()
            .filter(|a| limits.amount.contains(a))
            .ok_or(RecipesServiceError::AmountOutOfRange)?;
        ingredients.push(RecipeIngredientLine {
            ingredient_id: line.ingredient_id,
            amount,
        });
    }

    let mut seen_tags = HashSet::with_capacity(draft.tag_ids.len());
    if !draft.tag_ids.iter().all(|id| seen_tags.insert(*id)) {
        return Err(RecipesServiceError::DuplicateTag);
    }

    Ok(RecipeWrite {
        name: name.to_owned(),
        text: text.to_owned(),
        // accepts_cooking_time guarantees the value fits
        cooking_time: draft.cooking_time as i16,
        ingredients,
        tag_ids: draft.tag_ids,
    })
}
