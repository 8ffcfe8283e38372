use super::{validate_decimal_min_zero, EntityDto, ProductRefDto, SaleRefDto};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 10,
    "quantity": 2,
    "unitPrice": "24.95",
    "subtotal": "49.90",
    "product": {"id": 5, "name": "Desk lamp"},
    "sale": {"id": 1}
}))]
pub struct SaleTransactionDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(required, range(min = 1))]
    pub quantity: Option<i32>,
    #[serde(default)]
    #[validate(required, custom = "validate_decimal_min_zero")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    #[validate(required, custom = "validate_decimal_min_zero")]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    #[validate(required)]
    pub product: Option<ProductRefDto>,
    #[serde(default)]
    #[validate(required)]
    pub sale: Option<SaleRefDto>,
}

impl EntityDto for SaleTransactionDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
