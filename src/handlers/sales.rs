use super::common::{
    check_body_id, collection_method_not_allowed, created_response, criteria, deleted_response,
    eagerload, entity_not_found, not_found, page_request, page_response, reject_new_id,
    updated_response, JsonBody,
};
use crate::{
    criteria::{Criteria, QueryParams, SaleCriteria},
    dto::{validate_patch, SaleDto},
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

const ENTITY_NAME: &str = "sale";
const RESOURCE_PATH: &str = "/api/sales";

#[utoipa::path(
    post,
    path = "/api/sales",
    summary = "Create sale",
    request_body = SaleDto,
    responses(
        (status = 201, description = "Sale created", body = SaleDto,
            headers(("Location" = String, description = "URI of the new sale"))
        ),
        (status = 400, description = "Invalid body, id present or unknown client/seller", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<SaleDto>,
) -> Result<Response, ApiError> {
    debug!("REST request to save Sale");
    dto.validate()?;
    reject_new_id(dto.id, ENTITY_NAME)?;

    let created = state.services.sales.save(dto).await?;
    Ok(created_response(RESOURCE_PATH, ENTITY_NAME, created))
}

#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    summary = "Replace sale",
    params(("id" = i64, Path, description = "Sale id")),
    request_body = SaleDto,
    responses(
        (status = 200, description = "Sale replaced", body = SaleDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(dto): JsonBody<SaleDto>,
) -> Result<Response, ApiError> {
    debug!(sale_id = id, "REST request to update Sale");
    dto.validate()?;
    check_body_id(id, dto.id, ENTITY_NAME)?;
    if !state.services.sales.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    let updated = state.services.sales.update(id, dto).await?;
    Ok(updated_response(ENTITY_NAME, id, updated))
}

#[utoipa::path(
    patch,
    path = "/api/sales/{id}",
    summary = "Merge fields into sale",
    params(("id" = i64, Path, description = "Sale id")),
    request_body(content = SaleDto, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Sale updated", body = SaleDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Sale not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn partial_update_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<SaleDto>,
) -> Result<Response, ApiError> {
    debug!(sale_id = id, "REST request to partially update Sale");
    validate_patch(&patch)?;
    check_body_id(id, patch.id, ENTITY_NAME)?;
    if !state.services.sales.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    match state.services.sales.partial_update(id, patch).await? {
        Some(updated) => Ok(updated_response(ENTITY_NAME, id, updated)),
        None => Err(not_found(ENTITY_NAME, id)),
    }
}

#[utoipa::path(
    get,
    path = "/api/sales",
    summary = "List sales",
    description = "Page of sales matching `<field>.<operator>=<value>` filters",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property,(asc|desc)"),
        ("eagerload" = Option<bool>, Query, description = "Fill client and seller display fields (default true)"),
        ("distinct" = Option<bool>, Query, description = "Return distinct rows"),
    ),
    responses(
        (status = 200, description = "Sales page", body = [SaleDto],
            headers(
                ("X-Total-Count" = u64, description = "Total matching sales"),
                ("Link" = String, description = "Pagination links"),
            )
        ),
        (status = 400, description = "Malformed filter or paging parameter", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let criteria: SaleCriteria = criteria(&params, ENTITY_NAME)?;
    let pageable = page_request(&params, &state.config, ENTITY_NAME)?;
    let eagerload = eagerload(&params, ENTITY_NAME)?;
    debug!(?criteria, eagerload, "REST request to get Sales");

    let page = if criteria.is_unfiltered() {
        state.services.sales.find_all(&pageable, eagerload).await?
    } else {
        state
            .services
            .sale_queries
            .find_by_criteria(criteria, pageable, eagerload)
            .await?
    };
    Ok(page_response(&uri, page))
}

#[utoipa::path(
    get,
    path = "/api/sales/count",
    summary = "Count sales",
    responses(
        (status = 200, description = "Number of matching sales", body = u64),
        (status = 400, description = "Malformed filter", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn count_sales(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<u64>, ApiError> {
    let criteria: SaleCriteria = criteria(&params, ENTITY_NAME)?;
    let count = state.services.sale_queries.count_by_criteria(criteria).await?;
    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    summary = "Get sale",
    params(("id" = i64, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale with client and seller", body = SaleDto),
        (status = 404, description = "Sale not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(sale_id = id, "REST request to get Sale");
    state
        .services
        .sales
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTITY_NAME, id))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    summary = "Delete sale",
    description = "Deletes the sale and its transactions",
    params(("id" = i64, Path, description = "Sale id")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 404, description = "Sale not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    debug!(sale_id = id, "REST request to delete Sale");
    state.services.sales.delete(id).await?;
    Ok(deleted_response(ENTITY_NAME, id))
}

pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_sales)
                .post(create_sale)
                .put(collection_method_not_allowed)
                .patch(collection_method_not_allowed),
        )
        .route("/count", get(count_sales))
        .route(
            "/:id",
            get(get_sale)
                .put(update_sale)
                .patch(partial_update_sale)
                .delete(delete_sale),
        )
}
