use axum::{
    Json,
    extract::{Extension, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use brewops_catalog::NewBeerType;
use brewops_infra::catalog::CatalogStore;

use crate::app::dto::{CreateBeerTypeRequest, ListQuery};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_beer_types(
    Extension(services): Extension<AppServices>,
    q: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match q {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection(rejection),
    };

    match services.catalog.list_beer_types(q.page()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::store_error_to_response(e, "beer type"),
    }
}

pub async fn create_beer_type(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CreateBeerTypeRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    let new = match NewBeerType::new(
        &body.name,
        body.style,
        body.alcohol_content,
        body.description,
    ) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.create_beer_type(new).await {
        Ok(beer_type) => (StatusCode::CREATED, Json(beer_type)).into_response(),
        Err(e) => errors::store_error_to_response(e, "beer type"),
    }
}
