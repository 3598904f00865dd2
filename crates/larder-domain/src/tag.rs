//! Tag rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TAG_NAME_MAX_LEN: usize = 50;
pub const TAG_SLUG_MAX_LEN: usize = 100;

/// Display color of a tag, normalized to lowercase `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagColor(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct InvalidTagColor(pub String);

impl FromStr for TagColor {
    type Err = InvalidTagColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| InvalidTagColor(s.to_owned()))?;
        if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidTagColor(s.to_owned()));
        }
        Ok(Self(format!("#{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for TagColor {
    type Error = InvalidTagColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TagColor> for String {
    fn from(color: TagColor) -> Self {
        color.0
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slug: 1–100 chars of ASCII letters, digits, `-` and `_`.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= TAG_SLUG_MAX_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
