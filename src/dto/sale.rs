use super::{validate_decimal_min_zero, ClientRefDto, EntityDto, SellerRefDto};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "creationDate": "2024-03-01T10:15:00Z",
    "total": "149.90",
    "client": {"id": 3, "name": "Grace"},
    "seller": {"id": 1, "employeeCode": "EMP-0001"}
}))]
pub struct SaleDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(required)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(required, custom = "validate_decimal_min_zero")]
    pub total: Option<Decimal>,
    #[serde(default)]
    #[validate(required)]
    pub client: Option<ClientRefDto>,
    #[serde(default)]
    #[validate(required)]
    pub seller: Option<SellerRefDto>,
}

impl EntityDto for SaleDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
