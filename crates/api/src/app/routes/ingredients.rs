use axum::{
    Json,
    extract::{Extension, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use brewops_catalog::NewIngredient;
use brewops_infra::catalog::CatalogStore;

use crate::app::dto::{CreateIngredientRequest, ListQuery};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_ingredients(
    Extension(services): Extension<AppServices>,
    q: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match q {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection(rejection),
    };

    match services.catalog.list_ingredients(q.page()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::store_error_to_response(e, "ingredient"),
    }
}

pub async fn create_ingredient(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CreateIngredientRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    let new = match NewIngredient::new(&body.name, &body.kind) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.create_ingredient(new).await {
        Ok(ingredient) => (StatusCode::CREATED, Json(ingredient)).into_response(),
        Err(e) => errors::store_error_to_response(e, "ingredient"),
    }
}
