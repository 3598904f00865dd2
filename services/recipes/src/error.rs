use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    // validation
    #[error("recipe needs at least one ingredient")]
    MissingIngredients,
    #[error("ingredient listed more than once")]
    DuplicateIngredient,
    #[error("ingredient amount out of range")]
    AmountOutOfRange,
    #[error("cooking time out of range")]
    CookingTimeOutOfRange,
    #[error("invalid name")]
    InvalidName,
    #[error("missing text")]
    MissingText,
    #[error("unknown ingredient")]
    UnknownIngredient,
    #[error("unknown tag")]
    UnknownTag,
    #[error("tag listed more than once")]
    DuplicateTag,
    #[error("missing image")]
    MissingImage,
    #[error("invalid image")]
    InvalidImage,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("missing data")]
    MissingData,
    // duplicates
    #[error("recipe already favorited")]
    AlreadyFavorited,
    #[error("recipe already in shopping cart")]
    AlreadyInShoppingCart,
    #[error("already subscribed")]
    AlreadySubscribed,
    #[error("user already exists")]
    UserAlreadyExists,
    // not found
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("recipe not in favorites")]
    NotInFavorites,
    #[error("recipe not in shopping cart")]
    NotInShoppingCart,
    #[error("not subscribed")]
    NotSubscribed,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingIngredients => "MISSING_INGREDIENTS",
            Self::DuplicateIngredient => "DUPLICATE_INGREDIENT",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            Self::CookingTimeOutOfRange => "COOKING_TIME_OUT_OF_RANGE",
            Self::InvalidName => "INVALID_NAME",
            Self::MissingText => "MISSING_TEXT",
            Self::UnknownIngredient => "UNKNOWN_INGREDIENT",
            Self::UnknownTag => "UNKNOWN_TAG",
            Self::DuplicateTag => "DUPLICATE_TAG",
            Self::MissingImage => "MISSING_IMAGE",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MissingData => "MISSING_DATA",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::NotInFavorites => "NOT_IN_FAVORITES",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingIngredients
            | Self::DuplicateIngredient
            | Self::AmountOutOfRange
            | Self::CookingTimeOutOfRange
            | Self::InvalidName
            | Self::MissingText
            | Self::UnknownIngredient
            | Self::UnknownTag
            | Self::DuplicateTag
            | Self::MissingImage
            | Self::InvalidImage
            | Self::SelfSubscription
            | Self::InvalidUsername
            | Self::InvalidEmail
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::AlreadyFavorited
            | Self::AlreadyInShoppingCart
            | Self::AlreadySubscribed
            | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound
            | Self::NotInFavorites
            | Self::NotInShoppingCart
            | Self::NotSubscribed => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
