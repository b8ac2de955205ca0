use axum::{
    Json,
    extract::{Extension, Path, Query, rejection::{JsonRejection, PathRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use brewops_catalog::NewBrewery;
use brewops_core::BreweryId;
use brewops_infra::catalog::CatalogStore;

use crate::app::dto::{self, CreateBreweryRequest, ListQuery, MessageResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_breweries(
    Extension(services): Extension<AppServices>,
    q: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match q {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection(rejection),
    };

    match services.catalog.list_breweries(q.page()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::store_error_to_response(e, "brewery"),
    }
}

pub async fn create_brewery(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CreateBreweryRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    let new = match NewBrewery::new(&body.name, body.location, body.establishment_date) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.create_brewery(new).await {
        Ok(brewery) => {
            tracing::info!(brewery_id = %brewery.id, "brewery created");
            (StatusCode::CREATED, Json(brewery)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "brewery"),
    }
}

pub async fn delete_brewery(
    Extension(services): Extension<AppServices>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(rejection) => return errors::path_rejection(rejection),
    };

    let id: BreweryId = match dto::parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_brewery(id).await {
        Ok(()) => {
            tracing::info!(brewery_id = %id, "brewery deleted");
            Json(MessageResponse {
                message: format!("brewery {id} deleted"),
            })
            .into_response()
        }
        Err(e) => errors::store_error_to_response(e, "brewery"),
    }
}
