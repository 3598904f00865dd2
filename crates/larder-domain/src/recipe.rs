//! Recipe rules shared by the write path and the storage schema.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::pagination::Sort;

pub const RECIPE_NAME_MAX_LEN: usize = 256;

pub const DEFAULT_AMOUNT_MIN: i16 = 1;
pub const DEFAULT_AMOUNT_MAX: i16 = 1000;

/// One day, in minutes.
pub const DEFAULT_COOKING_TIME_MIN: i16 = 1;
pub const DEFAULT_COOKING_TIME_MAX: i16 = 24 * 60;

/// Numeric bounds applied to every recipe write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLimits {
    pub amount: RangeInclusive<i16>,
    pub cooking_time: RangeInclusive<i16>,
}

impl Default for RecipeLimits {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT_MIN..=DEFAULT_AMOUNT_MAX,
            cooking_time: DEFAULT_COOKING_TIME_MIN..=DEFAULT_COOKING_TIME_MAX,
        }
    }
}

impl RecipeLimits {
    /// Amounts and cooking times are positive; a lower bound under 1 is raised to 1.
    pub fn new(amount: RangeInclusive<i16>, cooking_time: RangeInclusive<i16>) -> Self {
        let positive = |r: RangeInclusive<i16>| (*r.start()).max(1)..=*r.end();
        Self {
            amount: positive(amount),
            cooking_time: positive(cooking_time),
        }
    }

    pub fn accepts_amount(&self, amount: i32) -> bool {
        i16::try_from(amount).is_ok_and(|a| self.amount.contains(&a))
    }

    pub fn accepts_cooking_time(&self, minutes: i32) -> bool {
        i16::try_from(minutes).is_ok_and(|m| self.cooking_time.contains(&m))
    }
}

/// Sort order for recipe listings.
///
/// Wire format is a single hyphenated string (`"published-at-desc"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSortBy {
    PublishedAt(Sort),
    Name(Sort),
}

impl Default for RecipeSortBy {
    fn default() -> Self {
        Self::PublishedAt(Sort::Desc)
    }
}

impl RecipeSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "published-at-desc" => Some(Self::PublishedAt(Sort::Desc)),
            "published-at-asc" => Some(Self::PublishedAt(Sort::Asc)),
            "name-asc" => Some(Self::Name(Sort::Asc)),
            "name-desc" => Some(Self::Name(Sort::Desc)),
            _ => None,
        }
    }

    pub fn as_kebab_case(self) -> &'static str {
        match self {
            Self::PublishedAt(Sort::Desc) => "published-at-desc",
            Self::PublishedAt(Sort::Asc) => "published-at-asc",
            Self::Name(Sort::Asc) => "name-asc",
            Self::Name(Sort::Desc) => "name-desc",
        }
    }
}

impl<'de> Deserialize<'de> for RecipeSortBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_kebab_case(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &s,
                &[
                    "published-at-desc",
                    "published-at-asc",
                    "name-asc",
                    "name-desc",
                ],
            )
        })
    }
}

impl Serialize for RecipeSortBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_kebab_case())
    }
}
