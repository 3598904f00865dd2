use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use larder_core::health::{healthz, readyz};
use larder_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    catalog::{get_ingredient, get_tag, list_ingredients, list_tags},
    link::{follow_short_link, get_recipe_link},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    relation::{add_favorite, add_to_cart, remove_favorite, remove_from_cart},
    shopping_list::{download_shopping_list, get_shopping_list},
    subscription::{list_subscriptions, subscribe, unsubscribe},
    user::{clear_avatar, create_user, delete_me, get_me, get_user, list_users, set_avatar},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.config.media_root);
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/@me", get(get_me).delete(delete_me))
        .route("/users/@me/avatar", put(set_avatar).delete(clear_avatar))
        .route("/users/{id}", get(get_user))
        // Subscriptions
        .route("/users/subscriptions", get(list_subscriptions))
        .route("/users/{id}/subscribe", post(subscribe).delete(unsubscribe))
        // Catalog
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(get_tag))
        .route("/ingredients", get(list_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Shopping list
        .route("/recipes/shopping_list", get(get_shopping_list))
        .route("/recipes/download_shopping_cart", get(download_shopping_list))
        // Recipes
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/{id}/favorite", post(add_favorite).delete(remove_favorite))
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart).delete(remove_from_cart),
        )
        // Short links
        .route("/recipes/{id}/get-link", get(get_recipe_link))
        .route("/r/{id}", get(follow_short_link))
        // Uploaded images
        .nest_service("/media", media)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
}
