use super::{required, EntityMapper};
use crate::dto::SellerDto;
use crate::entities::seller;
use crate::errors::ServiceError;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

pub struct SellerMapper;

impl EntityMapper for SellerMapper {
    type Entity = seller::Entity;
    type ActiveModel = seller::ActiveModel;
    type Dto = SellerDto;

    fn to_dto(model: seller::Model) -> SellerDto {
        SellerDto {
            id: Some(model.id),
            name: Some(model.name),
            last_name: Some(model.last_name),
            employee_code: Some(model.employee_code),
        }
    }

    fn to_active_model(id: Option<i64>, dto: &SellerDto) -> Result<seller::ActiveModel, ServiceError> {
        Ok(seller::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            name: Set(required(&dto.name, "name")?),
            last_name: Set(required(&dto.last_name, "lastName")?),
            employee_code: Set(required(&dto.employee_code, "employeeCode")?),
        })
    }

    fn apply_patch(active: &mut seller::ActiveModel, patch: &SellerDto) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
            changed.push("name");
        }
        if let Some(last_name) = &patch.last_name {
            active.last_name = Set(last_name.clone());
            changed.push("lastName");
        }
        if let Some(code) = &patch.employee_code {
            active.employee_code = Set(code.clone());
            changed.push("employeeCode");
        }
        changed
    }
}
