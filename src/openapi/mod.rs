use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Tracking API",
        version = "1.0.0",
        description = r#"
# Sales Tracking API

Sellers, sales and sale transactions, with an audit log of every change made
to a sale transaction.

## Pagination

List endpoints accept:
- `page`: zero-based page number (default: 0)
- `size`: items per page (default: 20, capped by configuration)
- `sort`: `property,(asc|desc)`, repeatable

The total is returned in `X-Total-Count` and navigation in the `Link` header.

## Filtering

Sellers, sales and transaction logs accept `<field>.<operator>=<value>`, e.g.
`total.greaterThan=100` or `employeeCode.contains=EMP`. Operators: `equals`,
`notEquals`, `in`, `notIn`, `specified`, `greaterThan`, `lessThan`,
`greaterThanOrEqual`, `lessThanOrEqual`, `contains`, `doesNotContain`.

## Errors

```json
{
  "error": "Bad Request",
  "message": "A new seller cannot already have an ID",
  "entityName": "seller",
  "errorKey": "idexists",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "sellers", description = "Seller management"),
        (name = "sales", description = "Sale management"),
        (name = "sale-transactions", description = "Sale line items; every change is audited"),
        (name = "transaction-logs", description = "Audit log of sale transaction changes")
    ),
    paths(
        // Sellers
        crate::handlers::sellers::create_seller,
        crate::handlers::sellers::update_seller,
        crate::handlers::sellers::partial_update_seller,
        crate::handlers::sellers::list_sellers,
        crate::handlers::sellers::count_sellers,
        crate::handlers::sellers::get_seller,
        crate::handlers::sellers::delete_seller,

        // Sales
        crate::handlers::sales::create_sale,
        crate::handlers::sales::update_sale,
        crate::handlers::sales::partial_update_sale,
        crate::handlers::sales::list_sales,
        crate::handlers::sales::count_sales,
        crate::handlers::sales::get_sale,
        crate::handlers::sales::delete_sale,

        // Sale transactions
        crate::handlers::sale_transactions::create_sale_transaction,
        crate::handlers::sale_transactions::update_sale_transaction,
        crate::handlers::sale_transactions::partial_update_sale_transaction,
        crate::handlers::sale_transactions::list_sale_transactions,
        crate::handlers::sale_transactions::get_sale_transaction,
        crate::handlers::sale_transactions::delete_sale_transaction,

        // Transaction logs
        crate::handlers::transaction_logs::create_transaction_log,
        crate::handlers::transaction_logs::update_transaction_log,
        crate::handlers::transaction_logs::partial_update_transaction_log,
        crate::handlers::transaction_logs::list_transaction_logs,
        crate::handlers::transaction_logs::count_transaction_logs,
        crate::handlers::transaction_logs::get_transaction_log,
        crate::handlers::transaction_logs::delete_transaction_log,
    ),
    components(
        schemas(
            crate::dto::SellerDto,
            crate::dto::SaleDto,
            crate::dto::SaleTransactionDto,
            crate::dto::TransactionLogDto,
            crate::dto::ClientRefDto,
            crate::dto::SellerRefDto,
            crate::dto::ProductRefDto,
            crate::dto::SaleRefDto,
            crate::dto::SaleTransactionRefDto,

            // Error types
            crate::errors::ErrorResponse,
            crate::errors::FieldErrorDetail
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
