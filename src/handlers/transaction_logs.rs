use super::common::{
    check_body_id, collection_method_not_allowed, created_response, criteria, deleted_response,
    entity_not_found, not_found, page_request, page_response, reject_new_id, updated_response,
    JsonBody,
};
use crate::{
    criteria::{Criteria, QueryParams, TransactionLogCriteria},
    dto::{validate_patch, TransactionLogDto},
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

const ENTITY_NAME: &str = "transactionLog";
const RESOURCE_PATH: &str = "/api/transaction-logs";

#[utoipa::path(
    post,
    path = "/api/transaction-logs",
    summary = "Create transaction log entry",
    request_body = TransactionLogDto,
    responses(
        (status = 201, description = "Entry created", body = TransactionLogDto,
            headers(("Location" = String, description = "URI of the new entry"))
        ),
        (status = 400, description = "Invalid body or id present", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn create_transaction_log(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<TransactionLogDto>,
) -> Result<Response, ApiError> {
    debug!("REST request to save TransactionLog");
    dto.validate()?;
    reject_new_id(dto.id, ENTITY_NAME)?;

    let created = state.services.transaction_logs.save(dto).await?;
    Ok(created_response(RESOURCE_PATH, ENTITY_NAME, created))
}

#[utoipa::path(
    put,
    path = "/api/transaction-logs/{id}",
    summary = "Replace transaction log entry",
    params(("id" = i64, Path, description = "Entry id")),
    request_body = TransactionLogDto,
    responses(
        (status = 200, description = "Entry replaced", body = TransactionLogDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn update_transaction_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(dto): JsonBody<TransactionLogDto>,
) -> Result<Response, ApiError> {
    debug!(transaction_log_id = id, "REST request to update TransactionLog");
    dto.validate()?;
    check_body_id(id, dto.id, ENTITY_NAME)?;
    if !state.services.transaction_logs.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    let updated = state.services.transaction_logs.update(id, dto).await?;
    Ok(updated_response(ENTITY_NAME, id, updated))
}

#[utoipa::path(
    patch,
    path = "/api/transaction-logs/{id}",
    summary = "Merge fields into transaction log entry",
    params(("id" = i64, Path, description = "Entry id")),
    request_body(content = TransactionLogDto, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Entry updated", body = TransactionLogDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn partial_update_transaction_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<TransactionLogDto>,
) -> Result<Response, ApiError> {
    debug!(transaction_log_id = id, "REST request to partially update TransactionLog");
    validate_patch(&patch)?;
    check_body_id(id, patch.id, ENTITY_NAME)?;
    if !state.services.transaction_logs.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    match state
        .services
        .transaction_logs
        .partial_update(id, patch)
        .await?
    {
        Some(updated) => Ok(updated_response(ENTITY_NAME, id, updated)),
        None => Err(not_found(ENTITY_NAME, id)),
    }
}

#[utoipa::path(
    get,
    path = "/api/transaction-logs",
    summary = "List transaction log entries",
    description = "Page of audit entries matching `<field>.<operator>=<value>` filters",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property,(asc|desc)"),
        ("distinct" = Option<bool>, Query, description = "Return distinct rows"),
    ),
    responses(
        (status = 200, description = "Entries page", body = [TransactionLogDto],
            headers(
                ("X-Total-Count" = u64, description = "Total matching entries"),
                ("Link" = String, description = "Pagination links"),
            )
        ),
        (status = 400, description = "Malformed filter or paging parameter", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn list_transaction_logs(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let criteria: TransactionLogCriteria = criteria(&params, ENTITY_NAME)?;
    let pageable = page_request(&params, &state.config, ENTITY_NAME)?;
    debug!(?criteria, "REST request to get TransactionLogs");

    let page = if criteria.is_unfiltered() {
        state.services.transaction_logs.find_all(&pageable).await?
    } else {
        state
            .services
            .transaction_log_queries
            .find_by_criteria(criteria, pageable)
            .await?
    };
    Ok(page_response(&uri, page))
}

#[utoipa::path(
    get,
    path = "/api/transaction-logs/count",
    summary = "Count transaction log entries",
    responses(
        (status = 200, description = "Number of matching entries", body = u64),
        (status = 400, description = "Malformed filter", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn count_transaction_logs(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<u64>, ApiError> {
    let criteria: TransactionLogCriteria = criteria(&params, ENTITY_NAME)?;
    let count = state
        .services
        .transaction_log_queries
        .count_by_criteria(criteria)
        .await?;
    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/api/transaction-logs/{id}",
    summary = "Get transaction log entry",
    params(("id" = i64, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry found", body = TransactionLogDto),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn get_transaction_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(transaction_log_id = id, "REST request to get TransactionLog");
    state
        .services
        .transaction_logs
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTITY_NAME, id))
}

#[utoipa::path(
    delete,
    path = "/api/transaction-logs/{id}",
    summary = "Delete transaction log entry",
    params(("id" = i64, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorResponse),
    ),
    tag = "transaction-logs"
)]
pub async fn delete_transaction_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    debug!(transaction_log_id = id, "REST request to delete TransactionLog");
    state.services.transaction_logs.delete(id).await?;
    Ok(deleted_response(ENTITY_NAME, id))
}

pub fn transaction_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_transaction_logs)
                .post(create_transaction_log)
                .put(collection_method_not_allowed)
                .patch(collection_method_not_allowed),
        )
        .route("/count", get(count_transaction_logs))
        .route(
            "/:id",
            get(get_transaction_log)
                .put(update_transaction_log)
                .patch(partial_update_transaction_log)
                .delete(delete_transaction_log),
        )
}
