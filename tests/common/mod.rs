#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use sales_tracking_api::{
    config::AppConfig,
    db,
    entities::{client, product},
    AppState,
};
use sea_orm::{ActiveModelTrait, NotSet, Set};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Response status, headers and decoded JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().expect("response body carries an id")
    }
}

/// Helper harness running the full router against a fresh SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub client_id: i64,
    pub product_id: i64,
    _dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir for test database");
        let db_file = dir.path().join("sales_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.api_default_page_size = 20;
        cfg.api_max_page_size = 50;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let client = client::ActiveModel {
            id: NotSet,
            name: Set("Grace".to_string()),
            last_name: Set(Some("Hopper".to_string())),
            mobile: Set(None),
        }
        .insert(&pool)
        .await
        .expect("seed client");
        let product = product::ActiveModel {
            id: NotSet,
            name: Set("Keyboard".to_string()),
        }
        .insert(&pool)
        .await
        .expect("seed product");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = sales_tracking_api::app_router(state.clone());

        Self {
            router,
            state,
            client_id: client.id,
            product_id: product.id,
            _dir: dir,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.request_with_type(method, uri, body, "application/json")
            .await
    }

    pub async fn request_with_type(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        content_type: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, content_type);
                Body::from(serde_json::to_vec(&json).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request_with_type(Method::PATCH, uri, Some(body), "application/merge-patch+json")
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a seller and returns its id.
    pub async fn create_seller(&self, code: &str) -> i64 {
        let response = self
            .post(
                "/api/sellers",
                serde_json::json!({"name": "Ada", "lastName": "Lovelace", "employeeCode": code}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Creates a sale for the seeded client and returns its id.
    pub async fn create_sale(&self, seller_id: i64, total: &str) -> i64 {
        let response = self
            .post(
                "/api/sales",
                serde_json::json!({
                    "creationDate": "2024-03-01T10:15:00Z",
                    "total": total,
                    "client": {"id": self.client_id},
                    "seller": {"id": seller_id}
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Creates a sale transaction for the seeded product and returns its id.
    pub async fn create_sale_transaction(&self, sale_id: i64, quantity: i32) -> i64 {
        let response = self
            .post(
                "/api/sale-transactions",
                serde_json::json!({
                    "quantity": quantity,
                    "unitPrice": "10.00",
                    "subtotal": format!("{}.00", quantity * 10),
                    "product": {"id": self.product_id},
                    "sale": {"id": sale_id}
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }
}
