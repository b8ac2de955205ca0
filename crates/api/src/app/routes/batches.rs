//! Batches, sales and the remaining-volume view.

use axum::{
    Json,
    extract::{Extension, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use brewops_core::{BatchId, BeerTypeId};
use brewops_infra::inventory::{BalanceView, InventoryStore};
use brewops_inventory::{NewBatch, NewSale};

use crate::app::dto::{
    self, CreateBatchRequest, CreateSaleRequest, ListQuery, RemainingVolumeQuery,
    RemainingVolumeResponse,
};
use crate::app::errors;
use crate::app::services::AppServices;

/// Balance rows (`BatchBalance`), flat and fully materialized.
pub async fn list_batches(
    Extension(services): Extension<AppServices>,
    q: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match q {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection(rejection),
    };

    match services.inventory.list_balances(q.page()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::store_error_to_response(e, "batch"),
    }
}

pub async fn create_batch(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CreateBatchRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    let beer_type_id: BeerTypeId = match dto::parse_id(body.beer_type_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let new = match NewBatch::new(beer_type_id, body.production_date, body.volume) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.create_batch(new).await {
        Ok(batch) => {
            tracing::info!(batch_id = %batch.id, beer_type_id = %batch.beer_type_id, "batch created");
            (StatusCode::CREATED, Json(batch)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "beer type"),
    }
}

pub async fn record_sale(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    let batch_id: BatchId = match dto::parse_id(body.batch_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let new = match NewSale::new(batch_id, body.sale_date, body.quantity, body.price) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.record_sale(new).await {
        Ok(sale) => {
            tracing::info!(sale_id = %sale.id, batch_id = %sale.batch_id, "sale recorded");
            (StatusCode::CREATED, Json(sale)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "batch"),
    }
}

pub async fn remaining_volume(
    Extension(services): Extension<AppServices>,
    q: Result<Query<RemainingVolumeQuery>, QueryRejection>,
) -> Response {
    let Query(q) = match q {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection(rejection),
    };

    // Ids are positive, so nothing can exist below 1.
    let Ok(batch_id) = BatchId::try_from(q.batch_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "batch not found");
    };

    match services.inventory.remaining_volume(batch_id).await {
        Ok(remaining_volume) => Json(RemainingVolumeResponse {
            batch_id,
            remaining_volume,
        })
        .into_response(),
        Err(e) => errors::store_error_to_response(e, "batch"),
    }
}
