mod common;

use axum::http::StatusCode;
use common::TestApp;
use sales_tracking_api::entities::transaction_log;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::{json, Value};

async fn audit_rows(app: &TestApp) -> Vec<transaction_log::Model> {
    transaction_log::Entity::find()
        .order_by_asc(transaction_log::Column::Id)
        .all(app.state.db.as_ref())
        .await
        .unwrap()
}

fn snapshot(raw: &Option<String>) -> Value {
    serde_json::from_str(raw.as_deref().expect("snapshot present")).unwrap()
}

#[tokio::test]
async fn create_writes_create_audit_row() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;

    let line = app.create_sale_transaction(sale_id, 2).await;

    let rows = audit_rows(&app).await;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.operation_type, "CREATE");
    assert_eq!(row.field_changed, "*");
    assert_eq!(row.modified_by, "system");
    assert_eq!(row.sale_transaction_id, Some(line));
    assert!(row.old_value.is_none());
    assert_eq!(snapshot(&row.new_value)["quantity"], 2);
}

#[tokio::test]
async fn get_loads_product_name() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;
    let line = app.create_sale_transaction(sale_id, 2).await;

    let response = app.get(&format!("/api/sale-transactions/{line}")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["product"],
        json!({"id": app.product_id, "name": "Keyboard"})
    );
    assert_eq!(response.body["sale"], json!({"id": sale_id}));

    let lazy = app.get("/api/sale-transactions?eagerload=false").await;
    assert_eq!(lazy.body[0]["product"], json!({"id": app.product_id}));
    assert_eq!(lazy.header("x-total-count"), Some("1"));
}

#[tokio::test]
async fn put_writes_put_audit_row_with_both_snapshots() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;
    let line = app.create_sale_transaction(sale_id, 2).await;

    let response = app
        .put(
            &format!("/api/sale-transactions/{line}"),
            json!({
                "id": line,
                "quantity": 3,
                "unitPrice": "10.00",
                "subtotal": "30.00",
                "product": {"id": app.product_id},
                "sale": {"id": sale_id}
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("x-salestrackingapp-alert"),
        Some("salesTrackingApp.saleTransaction.updated")
    );

    let rows = audit_rows(&app).await;
    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert_eq!(row.operation_type, "PUT");
    assert_eq!(row.field_changed, "*");
    assert_eq!(snapshot(&row.old_value)["quantity"], 2);
    assert_eq!(snapshot(&row.new_value)["quantity"], 3);
}

#[tokio::test]
async fn patch_writes_patch_audit_row_naming_changed_fields() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;
    let line = app.create_sale_transaction(sale_id, 2).await;

    let response = app
        .patch(
            &format!("/api/sale-transactions/{line}"),
            json!({"id": line, "quantity": 5, "subtotal": "50.00"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["quantity"], 5);
    assert_eq!(response.body["sale"]["id"], sale_id);

    let rows = audit_rows(&app).await;
    let row = rows.last().unwrap();
    assert_eq!(row.operation_type, "PATCH");
    assert_eq!(row.field_changed, "quantity,subtotal");
    assert_eq!(snapshot(&row.old_value)["quantity"], 2);
    assert_eq!(snapshot(&row.new_value)["quantity"], 5);
}

#[tokio::test]
async fn delete_writes_exactly_one_delete_audit_row() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;
    let line = app.create_sale_transaction(sale_id, 2).await;
    let before = audit_rows(&app).await.len();

    let response = app.delete(&format!("/api/sale-transactions/{line}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let rows = audit_rows(&app).await;
    assert_eq!(rows.len(), before + 1);
    let deletes = transaction_log::Entity::find()
        .filter(transaction_log::Column::OperationType.eq("DELETE"))
        .all(app.state.db.as_ref())
        .await
        .unwrap();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].field_changed, "*");
    assert!(deletes[0].new_value.is_none());
    assert_eq!(snapshot(&deletes[0].old_value)["id"], line);
    // the log outlives the row it describes
    assert_eq!(deletes[0].sale_transaction_id, None);
}

#[tokio::test]
async fn failed_mutation_leaves_no_audit_row() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;
    let line = app.create_sale_transaction(sale_id, 2).await;

    let response = app
        .patch(
            &format!("/api/sale-transactions/{line}"),
            json!({"id": line, "product": {"id": 9999}}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "productnotfound");
    assert_eq!(audit_rows(&app).await.len(), 1);
}

#[tokio::test]
async fn invalid_quantity_is_rejected_before_any_write() {
    let app = TestApp::new().await;
    let seller_id = app.create_seller("EMP-0001").await;
    let sale_id = app.create_sale(seller_id, "20.00").await;

    let response = app
        .post(
            "/api/sale-transactions",
            json!({
                "quantity": 0,
                "unitPrice": "10.00",
                "subtotal": "0.00",
                "product": {"id": app.product_id},
                "sale": {"id": sale_id}
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"][0]["field"], "quantity");
    assert!(audit_rows(&app).await.is_empty());
}

#[tokio::test]
async fn patch_on_missing_transaction_is_idnotfound() {
    let app = TestApp::new().await;

    let response = app
        .patch("/api/sale-transactions/77", json!({"id": 77, "quantity": 1}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "idnotfound");
}
