//! Sale transaction resource. Every mutation here also appends an audit row
//! visible under `/api/transaction-logs`.

use super::common::{
    check_body_id, collection_method_not_allowed, created_response, deleted_response, eagerload,
    entity_not_found, not_found, page_request, page_response, reject_new_id, updated_response,
    JsonBody,
};
use crate::{
    criteria::QueryParams,
    dto::{validate_patch, SaleTransactionDto},
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;
use validator::Validate;

const ENTITY_NAME: &str = "saleTransaction";
const RESOURCE_PATH: &str = "/api/sale-transactions";

#[utoipa::path(
    post,
    path = "/api/sale-transactions",
    summary = "Create sale transaction",
    request_body = SaleTransactionDto,
    responses(
        (status = 201, description = "Sale transaction created and logged", body = SaleTransactionDto,
            headers(("Location" = String, description = "URI of the new sale transaction"))
        ),
        (status = 400, description = "Invalid body, id present or unknown product/sale", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn create_sale_transaction(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<SaleTransactionDto>,
) -> Result<Response, ApiError> {
    debug!("REST request to save SaleTransaction");
    dto.validate()?;
    reject_new_id(dto.id, ENTITY_NAME)?;

    let created = state.services.sale_transactions.save(dto).await?;
    Ok(created_response(RESOURCE_PATH, ENTITY_NAME, created))
}

#[utoipa::path(
    put,
    path = "/api/sale-transactions/{id}",
    summary = "Replace sale transaction",
    params(("id" = i64, Path, description = "Sale transaction id")),
    request_body = SaleTransactionDto,
    responses(
        (status = 200, description = "Sale transaction replaced and logged", body = SaleTransactionDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn update_sale_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(dto): JsonBody<SaleTransactionDto>,
) -> Result<Response, ApiError> {
    debug!(sale_transaction_id = id, "REST request to update SaleTransaction");
    dto.validate()?;
    check_body_id(id, dto.id, ENTITY_NAME)?;
    if !state.services.sale_transactions.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    let updated = state.services.sale_transactions.update(id, dto).await?;
    Ok(updated_response(ENTITY_NAME, id, updated))
}

#[utoipa::path(
    patch,
    path = "/api/sale-transactions/{id}",
    summary = "Merge fields into sale transaction",
    params(("id" = i64, Path, description = "Sale transaction id")),
    request_body(content = SaleTransactionDto, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Sale transaction updated and logged", body = SaleTransactionDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Sale transaction not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn partial_update_sale_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<SaleTransactionDto>,
) -> Result<Response, ApiError> {
    debug!(sale_transaction_id = id, "REST request to partially update SaleTransaction");
    validate_patch(&patch)?;
    check_body_id(id, patch.id, ENTITY_NAME)?;
    if !state.services.sale_transactions.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    match state
        .services
        .sale_transactions
        .partial_update(id, patch)
        .await?
    {
        Some(updated) => Ok(updated_response(ENTITY_NAME, id, updated)),
        None => Err(not_found(ENTITY_NAME, id)),
    }
}

#[utoipa::path(
    get,
    path = "/api/sale-transactions",
    summary = "List sale transactions",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property,(asc|desc)"),
        ("eagerload" = Option<bool>, Query, description = "Fill product display fields (default true)"),
    ),
    responses(
        (status = 200, description = "Sale transactions page", body = [SaleTransactionDto],
            headers(
                ("X-Total-Count" = u64, description = "Total sale transactions"),
                ("Link" = String, description = "Pagination links"),
            )
        ),
        (status = 400, description = "Malformed paging parameter", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn list_sale_transactions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let pageable = page_request(&params, &state.config, ENTITY_NAME)?;
    let eagerload = eagerload(&params, ENTITY_NAME)?;
    debug!(eagerload, "REST request to get a page of SaleTransactions");

    let page = state
        .services
        .sale_transactions
        .find_all(&pageable, eagerload)
        .await?;
    Ok(page_response(&uri, page))
}

#[utoipa::path(
    get,
    path = "/api/sale-transactions/{id}",
    summary = "Get sale transaction",
    params(("id" = i64, Path, description = "Sale transaction id")),
    responses(
        (status = 200, description = "Sale transaction with product", body = SaleTransactionDto),
        (status = 404, description = "Sale transaction not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn get_sale_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(sale_transaction_id = id, "REST request to get SaleTransaction");
    state
        .services
        .sale_transactions
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTITY_NAME, id))
}

#[utoipa::path(
    delete,
    path = "/api/sale-transactions/{id}",
    summary = "Delete sale transaction",
    params(("id" = i64, Path, description = "Sale transaction id")),
    responses(
        (status = 204, description = "Sale transaction deleted and logged"),
        (status = 404, description = "Sale transaction not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sale-transactions"
)]
pub async fn delete_sale_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    debug!(sale_transaction_id = id, "REST request to delete SaleTransaction");
    state.services.sale_transactions.delete(id).await?;
    Ok(deleted_response(ENTITY_NAME, id))
}

pub fn sale_transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_sale_transactions)
                .post(create_sale_transaction)
                .put(collection_method_not_allowed)
                .patch(collection_method_not_allowed),
        )
        .route(
            "/:id",
            get(get_sale_transaction)
                .put(update_sale_transaction)
                .patch(partial_update_sale_transaction)
                .delete(delete_sale_transaction),
        )
}
