use super::{required, EntityMapper};
use crate::dto::{ClientRefDto, SaleDto, SellerRefDto};
use crate::entities::{client, sale, seller};
use crate::errors::ServiceError;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

pub struct SaleMapper;

impl SaleMapper {
    /// DTO carrying the client name and seller code when those rows were loaded.
    pub fn to_dto_with(
        model: sale::Model,
        client: Option<client::Model>,
        seller: Option<seller::Model>,
    ) -> SaleDto {
        let mut dto = Self::to_dto(model);
        if let (Some(reference), Some(client)) = (dto.client.as_mut(), client) {
            reference.name = Some(client.name);
        }
        if let (Some(reference), Some(seller)) = (dto.seller.as_mut(), seller) {
            reference.employee_code = Some(seller.employee_code);
        }
        dto
    }
}

impl EntityMapper for SaleMapper {
    type Entity = sale::Entity;
    type ActiveModel = sale::ActiveModel;
    type Dto = SaleDto;

    fn to_dto(model: sale::Model) -> SaleDto {
        SaleDto {
            id: Some(model.id),
            creation_date: Some(model.creation_date),
            total: Some(model.total),
            client: Some(ClientRefDto {
                id: model.client_id,
                name: None,
            }),
            seller: Some(SellerRefDto {
                id: model.seller_id,
                employee_code: None,
            }),
        }
    }

    fn to_active_model(id: Option<i64>, dto: &SaleDto) -> Result<sale::ActiveModel, ServiceError> {
        Ok(sale::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            creation_date: Set(required(&dto.creation_date, "creationDate")?),
            total: Set(required(&dto.total, "total")?),
            client_id: Set(required(&dto.client, "client")?.id),
            seller_id: Set(required(&dto.seller, "seller")?.id),
        })
    }

    fn apply_patch(active: &mut sale::ActiveModel, patch: &SaleDto) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(creation_date) = patch.creation_date {
            active.creation_date = Set(creation_date);
            changed.push("creationDate");
        }
        if let Some(total) = patch.total {
            active.total = Set(total);
            changed.push("total");
        }
        if let Some(client) = &patch.client {
            active.client_id = Set(client.id);
            changed.push("client");
        }
        if let Some(seller) = &patch.seller {
            active.seller_id = Set(seller.id);
            changed.push("seller");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn model() -> sale::Model {
        sale::Model {
            id: 9,
            creation_date: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap(),
            total: dec!(149.90),
            client_id: 3,
            seller_id: 1,
        }
    }

    #[test]
    fn dto_round_trip_preserves_fields() {
        let dto = SaleMapper::to_dto(model());
        assert_eq!(dto.client.as_ref().map(|c| c.id), Some(3));
        let active = SaleMapper::to_active_model(dto.id, &dto).unwrap();
        assert_eq!(sale::Model::try_from(active).unwrap(), model());
    }

    #[test]
    fn eager_projection_fills_display_fields() {
        let client = client::Model {
            id: 3,
            name: "Grace".into(),
            last_name: None,
            mobile: None,
        };
        let seller = seller::Model {
            id: 1,
            name: "Ada".into(),
            last_name: "Lovelace".into(),
            employee_code: "EMP-1".into(),
        };

        let dto = SaleMapper::to_dto_with(model(), Some(client), Some(seller));
        assert_eq!(
            dto.client,
            Some(ClientRefDto {
                id: 3,
                name: Some("Grace".into())
            })
        );
        assert_eq!(
            dto.seller.and_then(|s| s.employee_code).as_deref(),
            Some("EMP-1")
        );
    }

    #[test]
    fn missing_seller_reference_is_rejected() {
        let mut dto = SaleMapper::to_dto(model());
        dto.seller = None;
        assert!(SaleMapper::to_active_model(None, &dto).is_err());
    }
}
