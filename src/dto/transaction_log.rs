use super::{EntityDto, SaleTransactionRefDto};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 42,
    "timestamp": "2024-03-01T10:15:00Z",
    "operationType": "PATCH",
    "fieldChanged": "quantity",
    "oldValue": "{\"quantity\":1}",
    "newValue": "{\"quantity\":2}",
    "modifiedBy": "system",
    "saleTransaction": {"id": 10}
}))]
pub struct TransactionLogDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(required)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(required, length(max = 50))]
    pub operation_type: Option<String>,
    #[serde(default)]
    #[validate(required, length(max = 100))]
    pub field_changed: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub old_value: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub new_value: Option<String>,
    #[serde(default)]
    #[validate(required, length(max = 100))]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub sale_transaction: Option<SaleTransactionRefDto>,
}

impl EntityDto for TransactionLogDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
