use super::common::{
    check_body_id, collection_method_not_allowed, created_response, criteria, deleted_response,
    entity_not_found, not_found, page_request, page_response, reject_new_id, updated_response,
    JsonBody,
};
use crate::{
    criteria::{Criteria, QueryParams, SellerCriteria},
    dto::{validate_patch, SellerDto},
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

const ENTITY_NAME: &str = "seller";
const RESOURCE_PATH: &str = "/api/sellers";

#[utoipa::path(
    post,
    path = "/api/sellers",
    summary = "Create seller",
    request_body = SellerDto,
    responses(
        (status = 201, description = "Seller created", body = SellerDto,
            headers(("Location" = String, description = "URI of the new seller"))
        ),
        (status = 400, description = "Invalid body, id present or employee code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn create_seller(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<SellerDto>,
) -> Result<Response, ApiError> {
    debug!("REST request to save Seller");
    dto.validate()?;
    reject_new_id(dto.id, ENTITY_NAME)?;

    let created = state.services.sellers.save(dto).await?;
    Ok(created_response(RESOURCE_PATH, ENTITY_NAME, created))
}

#[utoipa::path(
    put,
    path = "/api/sellers/{id}",
    summary = "Replace seller",
    params(("id" = i64, Path, description = "Seller id")),
    request_body = SellerDto,
    responses(
        (status = 200, description = "Seller replaced", body = SellerDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn update_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(dto): JsonBody<SellerDto>,
) -> Result<Response, ApiError> {
    debug!(seller_id = id, "REST request to update Seller");
    dto.validate()?;
    check_body_id(id, dto.id, ENTITY_NAME)?;
    if !state.services.sellers.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    let updated = state.services.sellers.update(id, dto).await?;
    Ok(updated_response(ENTITY_NAME, id, updated))
}

#[utoipa::path(
    patch,
    path = "/api/sellers/{id}",
    summary = "Merge fields into seller",
    params(("id" = i64, Path, description = "Seller id")),
    request_body(content = SellerDto, content_type = "application/merge-patch+json"),
    responses(
        (status = 200, description = "Seller updated", body = SellerDto),
        (status = 400, description = "Invalid body or id mismatch", body = crate::errors::ErrorResponse),
        (status = 404, description = "Seller not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn partial_update_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<SellerDto>,
) -> Result<Response, ApiError> {
    debug!(seller_id = id, "REST request to partially update Seller");
    validate_patch(&patch)?;
    check_body_id(id, patch.id, ENTITY_NAME)?;
    if !state.services.sellers.exists(id).await? {
        return Err(entity_not_found(ENTITY_NAME));
    }

    match state.services.sellers.partial_update(id, patch).await? {
        Some(updated) => Ok(updated_response(ENTITY_NAME, id, updated)),
        None => Err(not_found(ENTITY_NAME, id)),
    }
}

#[utoipa::path(
    get,
    path = "/api/sellers",
    summary = "List sellers",
    description = "Page of sellers matching `<field>.<operator>=<value>` filters",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property,(asc|desc)"),
        ("distinct" = Option<bool>, Query, description = "Return distinct rows"),
    ),
    responses(
        (status = 200, description = "Sellers page", body = [SellerDto],
            headers(
                ("X-Total-Count" = u64, description = "Total matching sellers"),
                ("Link" = String, description = "Pagination links"),
            )
        ),
        (status = 400, description = "Malformed filter or paging parameter", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let criteria: SellerCriteria = criteria(&params, ENTITY_NAME)?;
    let pageable = page_request(&params, &state.config, ENTITY_NAME)?;
    debug!(?criteria, "REST request to get Sellers");

    let page = if criteria.is_unfiltered() {
        state.services.sellers.find_all(&pageable).await?
    } else {
        state
            .services
            .seller_queries
            .find_by_criteria(criteria, pageable)
            .await?
    };
    Ok(page_response(&uri, page))
}

#[utoipa::path(
    get,
    path = "/api/sellers/count",
    summary = "Count sellers",
    responses(
        (status = 200, description = "Number of matching sellers", body = u64),
        (status = 400, description = "Malformed filter", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn count_sellers(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<u64>, ApiError> {
    let criteria: SellerCriteria = criteria(&params, ENTITY_NAME)?;
    let count = state
        .services
        .seller_queries
        .count_by_criteria(criteria)
        .await?;
    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/api/sellers/{id}",
    summary = "Get seller",
    params(("id" = i64, Path, description = "Seller id")),
    responses(
        (status = 200, description = "Seller found", body = SellerDto),
        (status = 404, description = "Seller not found", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn get_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(seller_id = id, "REST request to get Seller");
    state
        .services
        .sellers
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTITY_NAME, id))
}

#[utoipa::path(
    delete,
    path = "/api/sellers/{id}",
    summary = "Delete seller",
    params(("id" = i64, Path, description = "Seller id")),
    responses(
        (status = 204, description = "Seller deleted"),
        (status = 404, description = "Seller not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Seller still has sales", body = crate::errors::ErrorResponse),
    ),
    tag = "sellers"
)]
pub async fn delete_seller(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    debug!(seller_id = id, "REST request to delete Seller");
    state.services.sellers.delete(id).await?;
    Ok(deleted_response(ENTITY_NAME, id))
}

pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_sellers)
                .post(create_seller)
                .put(collection_method_not_allowed)
                .patch(collection_method_not_allowed),
        )
        .route("/count", get(count_sellers))
        .route(
            "/:id",
            get(get_seller)
                .put(update_seller)
                .patch(partial_update_seller)
                .delete(delete_seller),
        )
}
