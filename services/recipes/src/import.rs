//! Catalog file formats read by the `load-data` binary.

use anyhow::{Context as _, bail};
use serde::Deserialize;

use crate::domain::types::NewIngredient;
use crate::usecase::catalog::TagDraft;

#[derive(Deserialize)]
struct IngredientRow {
    name: String,
    measurement_unit: String,
}

#[derive(Deserialize)]
struct TagRow {
    name: String,
    color: String,
    slug: String,
}

/// Parse ingredients from a JSON array of `{name, measurement_unit}` objects or
/// from two-column `name,measurement_unit` CSV. JSON is detected by a leading `[`.
pub fn parse_ingredients(contents: &str) -> anyhow::Result<Vec<NewIngredient>> {
    let trimmed = contents.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('[') {
        let rows: Vec<IngredientRow> =
            serde_json::from_str(trimmed).context("parse ingredients JSON")?;
        return Ok(rows
            .into_iter()
            .map(|row| NewIngredient {
                name: row.name,
                measurement_unit: row.measurement_unit,
            })
            .collect());
    }

    let mut rows = Vec::new();
    for (index, line) in trimmed.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // Names may contain commas; the unit never does.
        let Some((name, unit)) = line.rsplit_once(',') else {
            bail!("line {}: expected `name,measurement_unit`", index + 1);
        };
        let (name, unit) = (unquote(name), unquote(unit));
        // Only whole-field quoting is understood, so `""` escapes are refused.
        if name.contains('"') || unit.contains('"') {
            bail!("line {}: quotes are only allowed around a whole field", index + 1);
        }
        rows.push(NewIngredient {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        });
    }
    Ok(rows)
}

/// Parse tags from a JSON array of `{name, color, slug}` objects.
pub fn parse_tags(contents: &str) -> anyhow::Result<Vec<TagDraft>> {
    let rows: Vec<TagRow> =
        serde_json::from_str(contents.trim_start_matches('\u{feff}')).context("parse tags JSON")?;
    Ok(rows
        .into_iter()
        .map(|row| TagDraft {
            name: row.name,
            color: row.color,
            slug: row.slug,
        })
        .collect())
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}
