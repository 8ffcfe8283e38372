//! Request extraction and response decoration shared by the entity resources.

use crate::{
    config::AppConfig,
    criteria::{Criteria, QueryParams},
    dto::EntityDto,
    errors::ApiError,
    pagination::{Page, Pageable},
};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;
use url::form_urlencoded;

/// Prefix of every alert header and alert message.
pub const APPLICATION_NAME: &str = "salesTrackingApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-salestrackingapp-alert");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-salestrackingapp-error");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-salestrackingapp-params");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

fn alert_headers(name: HeaderName, alert: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(alert) {
        headers.insert(name, value);
    }
    if let Ok(value) = HeaderValue::from_str(param) {
        headers.insert(PARAMS_HEADER, value);
    }
    headers
}

pub fn entity_created_headers(entity_name: &str, id: &str) -> HeaderMap {
    alert_headers(
        ALERT_HEADER,
        &format!("{}.{}.created", APPLICATION_NAME, entity_name),
        id,
    )
}

pub fn entity_updated_headers(entity_name: &str, id: &str) -> HeaderMap {
    alert_headers(
        ALERT_HEADER,
        &format!("{}.{}.updated", APPLICATION_NAME, entity_name),
        id,
    )
}

pub fn entity_deleted_headers(entity_name: &str, id: &str) -> HeaderMap {
    alert_headers(
        ALERT_HEADER,
        &format!("{}.{}.deleted", APPLICATION_NAME, entity_name),
        id,
    )
}

pub fn failure_alert_headers(entity_name: &str, error_key: &str) -> HeaderMap {
    alert_headers(ERROR_HEADER, &format!("error.{}", error_key), entity_name)
}

/// `X-Total-Count` plus a `Link` header with `next`, `prev`, `last` and `first`.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));

    let last = page.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);
    if page.number < last {
        links.push(link(uri, page.number + 1, page.size, "next"));
    }
    if page.number > 0 {
        links.push(link(uri, page.number - 1, page.size, "prev"));
    }
    links.push(link(uri, last, page.size, "last"));
    links.push(link(uri, 0, page.size, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(header::LINK, value);
    }
    headers
}

fn link(uri: &Uri, page: u64, size: u64, rel: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes()) {
        if key != "page" && key != "size" {
            query.append_pair(&key, &value);
        }
    }
    query
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string());

    format!("<{}?{}>; rel=\"{}\"", uri.path(), query.finish(), rel)
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = form_urlencoded::parse(parts.uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect::<Vec<_>>();
        Ok(QueryParams::new(pairs))
    }
}

/// JSON body extractor whose rejections render as [`ApiError`].
///
/// Accepts `application/json` and `+json` media types such as
/// `application/merge-patch+json`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_rejection(rejection)),
        }
    }
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    let status = match rejection.status() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError::InvalidBody {
        status,
        message: rejection.body_text(),
    }
}

/// POST bodies must leave the id to the database.
pub fn reject_new_id(id: Option<i64>, entity_name: &str) -> Result<(), ApiError> {
    if id.is_some() {
        return Err(ApiError::bad_request(
            format!("A new {} cannot already have an ID", entity_name),
            entity_name,
            "idexists",
        ));
    }
    Ok(())
}

/// PUT and PATCH bodies must carry the id named in the path.
pub fn check_body_id(path_id: i64, body_id: Option<i64>, entity_name: &str) -> Result<(), ApiError> {
    match body_id {
        None => Err(ApiError::bad_request("Invalid id", entity_name, "idnull")),
        Some(id) if id != path_id => {
            Err(ApiError::bad_request("Invalid ID", entity_name, "idinvalid"))
        }
        Some(_) => Ok(()),
    }
}

pub fn entity_not_found(entity_name: &str) -> ApiError {
    ApiError::bad_request("Entity not found", entity_name, "idnotfound")
}

pub fn not_found(entity_name: &str, id: i64) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", entity_name, id))
}

/// Reads `page`, `size` and `sort` with the configured size limits.
pub fn page_request(
    params: &QueryParams,
    config: &AppConfig,
    entity_name: &str,
) -> Result<Pageable, ApiError> {
    Pageable::from_params(
        params,
        config.api_default_page_size,
        config.api_max_page_size,
    )
    .map_err(|e| ApiError::bad_request(e.to_string(), entity_name, "badpaging"))
}

pub fn criteria<C: Criteria>(params: &QueryParams, entity_name: &str) -> Result<C, ApiError> {
    C::from_params(params).map_err(|e| ApiError::bad_request(e.to_string(), entity_name, "badfilter"))
}

/// `eagerload` flag; related rows are loaded unless it is `false`.
pub fn eagerload(params: &QueryParams, entity_name: &str) -> Result<bool, ApiError> {
    match params.get("eagerload") {
        None => Ok(true),
        Some(raw) => raw.trim().parse().map_err(|_| {
            ApiError::bad_request(
                format!("Invalid value '{}' for parameter 'eagerload'", raw),
                entity_name,
                "badfilter",
            )
        }),
    }
}

/// 201 with `Location`, alert headers and the created body.
pub fn created_response<T>(resource_path: &str, entity_name: &str, dto: T) -> Response
where
    T: EntityDto + Serialize,
{
    let id = dto.id().map(|id| id.to_string()).unwrap_or_default();
    let mut headers = entity_created_headers(entity_name, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("{}/{}", resource_path, id)) {
        headers.insert(header::LOCATION, location);
    }
    (StatusCode::CREATED, headers, Json(dto)).into_response()
}

pub fn updated_response<T: Serialize>(entity_name: &str, id: i64, dto: T) -> Response {
    (entity_updated_headers(entity_name, &id.to_string()), Json(dto)).into_response()
}

pub fn deleted_response(entity_name: &str, id: i64) -> Response {
    (
        StatusCode::NO_CONTENT,
        entity_deleted_headers(entity_name, &id.to_string()),
    )
        .into_response()
}

pub fn page_response<T: Serialize>(uri: &Uri, page: Page<T>) -> Response {
    (pagination_headers(uri, &page), Json(page.content)).into_response()
}

/// PUT and PATCH need an id in the path.
pub async fn collection_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed {
        message: "PUT and PATCH require an id in the path".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pageable;
    use assert_matches::assert_matches;

    fn page(number: u64, total: u64) -> Page<()> {
        Page::new(Vec::new(), &Pageable::new(number, 20), total)
    }

    fn links(headers: &HeaderMap) -> Vec<String> {
        headers[header::LINK]
            .to_str()
            .unwrap()
            .split(',')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn middle_page_links_every_relation() {
        let uri: Uri = "/api/sales?total.greaterThan=10&page=2&size=20&sort=total,desc"
            .parse()
            .unwrap();
        let headers = pagination_headers(&uri, &page(2, 95));

        assert_eq!(headers[TOTAL_COUNT_HEADER], "95");
        assert_eq!(
            links(&headers),
            vec![
                r#"</api/sales?total.greaterThan=10&sort=total%2Cdesc&page=3&size=20>; rel="next""#,
                r#"</api/sales?total.greaterThan=10&sort=total%2Cdesc&page=1&size=20>; rel="prev""#,
                r#"</api/sales?total.greaterThan=10&sort=total%2Cdesc&page=4&size=20>; rel="last""#,
                r#"</api/sales?total.greaterThan=10&sort=total%2Cdesc&page=0&size=20>; rel="first""#,
            ]
        );
    }

    #[test]
    fn single_page_has_only_last_and_first() {
        let uri: Uri = "/api/sellers".parse().unwrap();
        let headers = pagination_headers(&uri, &page(0, 3));
        assert_eq!(
            links(&headers),
            vec![
                r#"</api/sellers?page=0&size=20>; rel="last""#,
                r#"</api/sellers?page=0&size=20>; rel="first""#,
            ]
        );
    }

    #[test]
    fn success_alerts_name_entity_and_id() {
        let headers = entity_updated_headers("saleTransaction", "7");
        assert_eq!(headers[ALERT_HEADER], "salesTrackingApp.saleTransaction.updated");
        assert_eq!(headers[PARAMS_HEADER], "7");
    }

    #[test]
    fn body_id_rules() {
        assert_matches!(check_body_id(1, None, "sale"), Err(e) if e.error_key() == Some("idnull"));
        assert_matches!(check_body_id(1, Some(2), "sale"), Err(e) if e.error_key() == Some("idinvalid"));
        assert!(check_body_id(1, Some(1), "sale").is_ok());
        assert_matches!(reject_new_id(Some(3), "sale"), Err(e) if e.error_key() == Some("idexists"));
    }

    #[test]
    fn eagerload_defaults_to_true() {
        assert!(eagerload(&QueryParams::default(), "sale").unwrap());
        let params: QueryParams = [("eagerload", "false")].into_iter().collect();
        assert!(!eagerload(&params, "sale").unwrap());
        let params: QueryParams = [("eagerload", "sometimes")].into_iter().collect();
        assert!(eagerload(&params, "sale").is_err());
    }
}
