use super::{required, EntityMapper};
use crate::dto::{ProductRefDto, SaleRefDto, SaleTransactionDto};
use crate::entities::{product, sale_transaction};
use crate::errors::ServiceError;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

pub struct SaleTransactionMapper;

impl SaleTransactionMapper {
    /// DTO carrying the product name when the product row was loaded.
    pub fn to_dto_with(
        model: sale_transaction::Model,
        product: Option<product::Model>,
    ) -> SaleTransactionDto {
        let mut dto = Self::to_dto(model);
        if let (Some(reference), Some(product)) = (dto.product.as_mut(), product) {
            reference.name = Some(product.name);
        }
        dto
    }
}

impl EntityMapper for SaleTransactionMapper {
    type Entity = sale_transaction::Entity;
    type ActiveModel = sale_transaction::ActiveModel;
    type Dto = SaleTransactionDto;

    fn to_dto(model: sale_transaction::Model) -> SaleTransactionDto {
        SaleTransactionDto {
            id: Some(model.id),
            quantity: Some(model.quantity),
            unit_price: Some(model.unit_price),
            subtotal: Some(model.subtotal),
            product: Some(ProductRefDto {
                id: model.product_id,
                name: None,
            }),
            sale: Some(SaleRefDto { id: model.sale_id }),
        }
    }

    fn to_active_model(
        id: Option<i64>,
        dto: &SaleTransactionDto,
    ) -> Result<sale_transaction::ActiveModel, ServiceError> {
        Ok(sale_transaction::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            quantity: Set(required(&dto.quantity, "quantity")?),
            unit_price: Set(required(&dto.unit_price, "unitPrice")?),
            subtotal: Set(required(&dto.subtotal, "subtotal")?),
            product_id: Set(required(&dto.product, "product")?.id),
            sale_id: Set(required(&dto.sale, "sale")?.id),
        })
    }

    fn apply_patch(
        active: &mut sale_transaction::ActiveModel,
        patch: &SaleTransactionDto,
    ) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(quantity) = patch.quantity {
            active.quantity = Set(quantity);
            changed.push("quantity");
        }
        if let Some(unit_price) = patch.unit_price {
            active.unit_price = Set(unit_price);
            changed.push("unitPrice");
        }
        if let Some(subtotal) = patch.subtotal {
            active.subtotal = Set(subtotal);
            changed.push("subtotal");
        }
        if let Some(product) = &patch.product {
            active.product_id = Set(product.id);
            changed.push("product");
        }
        if let Some(sale) = &patch.sale {
            active.sale_id = Set(sale.id);
            changed.push("sale");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::IntoActiveModel;

    fn model() -> sale_transaction::Model {
        sale_transaction::Model {
            id: 10,
            quantity: 2,
            unit_price: dec!(24.95),
            subtotal: dec!(49.90),
            product_id: 5,
            sale_id: 1,
        }
    }

    #[test]
    fn dto_round_trip_preserves_fields() {
        let dto = SaleTransactionMapper::to_dto(model());
        let active = SaleTransactionMapper::to_active_model(dto.id, &dto).unwrap();
        assert_eq!(sale_transaction::Model::try_from(active).unwrap(), model());
    }

    #[test]
    fn patch_reports_changed_fields_in_order() {
        let mut active = model().into_active_model();
        let changed = SaleTransactionMapper::apply_patch(
            &mut active,
            &SaleTransactionDto {
                quantity: Some(3),
                subtotal: Some(dec!(74.85)),
                ..Default::default()
            },
        );
        assert_eq!(changed, vec!["quantity", "subtotal"]);
        assert!(!active.unit_price.is_set());
    }

    #[test]
    fn eager_projection_fills_product_name() {
        let product = product::Model {
            id: 5,
            name: "Desk lamp".into(),
        };
        let dto = SaleTransactionMapper::to_dto_with(model(), Some(product));
        assert_eq!(
            dto.product.and_then(|p| p.name).as_deref(),
            Some("Desk lamp")
        );
    }
}
