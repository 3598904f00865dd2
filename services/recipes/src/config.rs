use std::path::PathBuf;

use larder_core::config::{or_default, required};
use larder_domain::recipe::{
    DEFAULT_AMOUNT_MAX, DEFAULT_AMOUNT_MIN, DEFAULT_COOKING_TIME_MAX, DEFAULT_COOKING_TIME_MIN,
    RecipeLimits,
};

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    pub recipes_port: u16,
    /// Directory uploaded images are written under (default `./media`).
    pub media_root: PathBuf,
    /// URL prefix stored image references start with (default `/media`).
    pub media_base_url: String,
    /// Absolute origin used when building short links.
    pub public_base_url: String,
    pub limits: RecipeLimits,
}

impl RecipesConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let recipes_port = or_default("RECIPES_PORT", 3114)?;
        let amount_min = or_default("RECIPE_AMOUNT_MIN", DEFAULT_AMOUNT_MIN)?;
        let amount_max = or_default("RECIPE_AMOUNT_MAX", DEFAULT_AMOUNT_MAX)?;
        let cooking_time_min = or_default("RECIPE_COOKING_TIME_MIN", DEFAULT_COOKING_TIME_MIN)?;
        let cooking_time_max = or_default("RECIPE_COOKING_TIME_MAX", DEFAULT_COOKING_TIME_MAX)?;
        if amount_min > amount_max || cooking_time_min > cooking_time_max {
            anyhow::bail!("recipe bounds must satisfy MIN <= MAX");
        }
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            recipes_port,
            media_root: or_default("MEDIA_ROOT", PathBuf::from("./media"))?,
            media_base_url: or_default("MEDIA_BASE_URL", "/media".to_owned())?,
            public_base_url: or_default(
                "PUBLIC_BASE_URL",
                format!("http://localhost:{recipes_port}"),
            )?,
            limits: RecipeLimits::new(
                amount_min..=amount_max,
                cooking_time_min..=cooking_time_max,
            ),
        })
    }
}
