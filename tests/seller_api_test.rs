mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn create_seller_returns_location_and_alert() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/sellers",
            json!({"name": "Ada", "lastName": "Lovelace", "employeeCode": "EMP-0001"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.id();
    assert_eq!(
        response.header("location"),
        Some(format!("/api/sellers/{id}").as_str())
    );
    assert_eq!(
        response.header("x-salestrackingapp-alert"),
        Some("salesTrackingApp.seller.created")
    );
    assert_eq!(
        response.header("x-salestrackingapp-params"),
        Some(id.to_string().as_str())
    );
    assert_eq!(response.body["employeeCode"], "EMP-0001");

    let fetched = app.get(&format!("/api/sellers/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, response.body);
}

#[tokio::test]
async fn create_seller_with_id_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/sellers",
            json!({"id": 7, "name": "Ada", "lastName": "Lovelace", "employeeCode": "EMP-0001"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "idexists");
    assert_eq!(response.header("x-salestrackingapp-error"), Some("error.idexists"));
    assert_eq!(app.get("/api/sellers/count").await.body, json!(0));
}

#[tokio::test]
async fn missing_required_fields_are_reported_per_field() {
    let app = TestApp::new().await;

    let response = app.post("/api/sellers", json!({"name": "Ada"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["employee_code", "last_name"]);
}

#[tokio::test]
async fn duplicate_employee_code_is_rejected() {
    let app = TestApp::new().await;
    app.create_seller("EMP-0001").await;

    let response = app
        .post(
            "/api/sellers",
            json!({"name": "Alan", "lastName": "Turing", "employeeCode": "EMP-0001"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "employeecodeexists");
}

#[tokio::test]
async fn put_replaces_and_patch_merges() {
    let app = TestApp::new().await;
    let id = app.create_seller("EMP-0001").await;
    let uri = format!("/api/sellers/{id}");

    let replaced = app
        .put(
            &uri,
            json!({"id": id, "name": "Grace", "lastName": "Hopper", "employeeCode": "EMP-0002"}),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(
        replaced.header("x-salestrackingapp-alert"),
        Some("salesTrackingApp.seller.updated")
    );
    assert_eq!(replaced.body["name"], "Grace");

    let patched = app.patch(&uri, json!({"id": id, "lastName": "Brewster"})).await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(
        patched.body,
        json!({"id": id, "name": "Grace", "lastName": "Brewster", "employeeCode": "EMP-0002"})
    );
}

#[rstest]
#[case::missing_id(json!({"name": "X", "lastName": "Y", "employeeCode": "Z"}), "idnull")]
#[case::other_id(json!({"id": 999, "name": "X", "lastName": "Y", "employeeCode": "Z"}), "idinvalid")]
#[tokio::test]
async fn put_checks_body_id(#[case] body: serde_json::Value, #[case] key: &str) {
    let app = TestApp::new().await;
    let id = app.create_seller("EMP-0001").await;

    let response = app.put(&format!("/api/sellers/{id}"), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], key);
}

#[tokio::test]
async fn put_on_unknown_seller_is_idnotfound() {
    let app = TestApp::new().await;

    let response = app
        .put(
            "/api/sellers/42",
            json!({"id": 42, "name": "X", "lastName": "Y", "employeeCode": "Z"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "idnotfound");
}

#[tokio::test]
async fn collection_put_and_patch_are_not_allowed() {
    let app = TestApp::new().await;

    let put = app.put("/api/sellers", json!({})).await;
    assert_eq!(put.status, StatusCode::METHOD_NOT_ALLOWED);
    let patch = app.patch("/api/sellers", json!({})).await;
    assert_eq!(patch.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn list_filters_sorts_and_counts() {
    let app = TestApp::new().await;
    for code in ["EMP-0003", "EMP-0001", "MGR-0002"] {
        app.create_seller(code).await;
    }

    let all = app.get("/api/sellers?sort=employeeCode,desc").await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.header("x-total-count"), Some("3"));
    let codes: Vec<&str> = all
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["employeeCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["MGR-0002", "EMP-0003", "EMP-0001"]);

    let filtered = app.get("/api/sellers?employeeCode.contains=EMP").await;
    assert_eq!(filtered.header("x-total-count"), Some("2"));
    assert_eq!(filtered.body.as_array().unwrap().len(), 2);

    let count = app.get("/api/sellers/count?employeeCode.contains=EMP").await;
    assert_eq!(count.body, json!(2));

    let none = app.get("/api/sellers/count?employeeCode.equals=NOPE").await;
    assert_eq!(none.body, json!(0));
}

#[tokio::test]
async fn list_pages_carry_link_header() {
    let app = TestApp::new().await;
    for n in 0..5 {
        app.create_seller(&format!("EMP-{n:04}")).await;
    }

    let response = app.get("/api/sellers?page=1&size=2").await;

    assert_eq!(response.body.as_array().unwrap().len(), 2);
    assert_eq!(response.header("x-total-count"), Some("5"));
    let link = response.header("link").unwrap();
    assert!(link.contains(r#"</api/sellers?page=2&size=2>; rel="next""#), "{link}");
    assert!(link.contains(r#"</api/sellers?page=0&size=2>; rel="prev""#), "{link}");
    assert!(link.contains(r#"</api/sellers?page=2&size=2>; rel="last""#), "{link}");
    assert!(link.contains(r#"</api/sellers?page=0&size=2>; rel="first""#), "{link}");
}

#[rstest]
#[case::bad_filter("/api/sellers?id.equals=abc", "badfilter")]
#[case::bad_sort("/api/sellers?sort=salary,asc", "badsort")]
#[case::bad_page("/api/sellers?page=-1", "badpaging")]
#[tokio::test]
async fn malformed_list_parameters_are_rejected(#[case] uri: &str, #[case] key: &str) {
    let app = TestApp::new().await;

    let response = app.get(uri).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], key);
}

#[tokio::test]
async fn delete_seller_then_get_is_not_found() {
    let app = TestApp::new().await;
    let id = app.create_seller("EMP-0001").await;
    let uri = format!("/api/sellers/{id}");

    let deleted = app.delete(&uri).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(
        deleted.header("x-salestrackingapp-alert"),
        Some("salesTrackingApp.seller.deleted")
    );

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_seller_with_sales_conflicts() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "10.00").await;

    let response = app.delete(&format!("/api/sellers/{seller_id}")).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.get(&format!("/api/sellers/{seller_id}")).await.status, StatusCode::OK);

    assert_eq!(
        app.delete(&format!("/api/sales/{sale_id}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete(&format!("/api/sellers/{seller_id}")).await.status,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/sellers", Some(json!(["not", "an", "object"])))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
