use super::{required, EntityMapper};
use crate::dto::{SaleTransactionRefDto, TransactionLogDto};
use crate::entities::transaction_log;
use crate::errors::ServiceError;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

pub struct TransactionLogMapper;

impl EntityMapper for TransactionLogMapper {
    type Entity = transaction_log::Entity;
    type ActiveModel = transaction_log::ActiveModel;
    type Dto = TransactionLogDto;

    fn to_dto(model: transaction_log::Model) -> TransactionLogDto {
        TransactionLogDto {
            id: Some(model.id),
            timestamp: Some(model.timestamp),
            operation_type: Some(model.operation_type),
            field_changed: Some(model.field_changed),
            old_value: model.old_value,
            new_value: model.new_value,
            modified_by: Some(model.modified_by),
            sale_transaction: model
                .sale_transaction_id
                .map(|id| SaleTransactionRefDto { id }),
        }
    }

    fn to_active_model(
        id: Option<i64>,
        dto: &TransactionLogDto,
    ) -> Result<transaction_log::ActiveModel, ServiceError> {
        Ok(transaction_log::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            timestamp: Set(required(&dto.timestamp, "timestamp")?),
            operation_type: Set(required(&dto.operation_type, "operationType")?),
            field_changed: Set(required(&dto.field_changed, "fieldChanged")?),
            old_value: Set(dto.old_value.clone()),
            new_value: Set(dto.new_value.clone()),
            modified_by: Set(required(&dto.modified_by, "modifiedBy")?),
            sale_transaction_id: Set(dto.sale_transaction.as_ref().map(|r| r.id)),
        })
    }

    fn apply_patch(
        active: &mut transaction_log::ActiveModel,
        patch: &TransactionLogDto,
    ) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if let Some(timestamp) = patch.timestamp {
            active.timestamp = Set(timestamp);
            changed.push("timestamp");
        }
        if let Some(v) = &patch.operation_type {
            active.operation_type = Set(v.clone());
            changed.push("operationType");
        }
        if let Some(v) = &patch.field_changed {
            active.field_changed = Set(v.clone());
            changed.push("fieldChanged");
        }
        if let Some(v) = &patch.old_value {
            active.old_value = Set(Some(v.clone()));
            changed.push("oldValue");
        }
        if let Some(v) = &patch.new_value {
            active.new_value = Set(Some(v.clone()));
            changed.push("newValue");
        }
        if let Some(v) = &patch.modified_by {
            active.modified_by = Set(v.clone());
            changed.push("modifiedBy");
        }
        if let Some(reference) = &patch.sale_transaction {
            active.sale_transaction_id = Set(Some(reference.id));
            changed.push("saleTransaction");
        }
        changed
    }
}
