use super::EntityDto;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Ada",
    "lastName": "Lovelace",
    "employeeCode": "EMP-0001"
}))]
pub struct SellerDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(required, length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(required, length(max = 100))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(required, length(max = 50))]
    pub employee_code: Option<String>,
}

impl EntityDto for SellerDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}
