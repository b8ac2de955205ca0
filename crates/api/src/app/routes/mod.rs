use axum::{
    Router,
    routing::{delete, get, post},
};

pub mod auth;
pub mod batches;
pub mod beer_types;
pub mod breweries;
pub mod ingredients;
pub mod system;

/// Endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Endpoints behind the session gate.
pub fn protected_router() -> Router {
    Router::new()
        .route("/me", get(system::me))
        .route(
            "/breweries",
            get(breweries::list_breweries).post(breweries::create_brewery),
        )
        .route("/breweries/:id", delete(breweries::delete_brewery))
        .route(
            "/beer_types",
            get(beer_types::list_beer_types).post(beer_types::create_beer_type),
        )
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/batches",
            get(batches::list_batches).post(batches::create_batch),
        )
        .route("/sales", post(batches::record_sale))
        .route("/remaining_volume", get(batches::remaining_volume))
}
