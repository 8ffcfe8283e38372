use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Append-only audit row describing one mutation of a sale transaction.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation_type: String,
    pub field_changed: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub modified_by: String,
    pub sale_transaction_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale_transaction::Entity",
        from = "Column::SaleTransactionId",
        to = "super::sale_transaction::Column::Id",
        on_delete = "SetNull"
    )]
    SaleTransaction,
}

impl Related<super::sale_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl crate::pagination::SortableEntity for Entity {
    const ENTITY_NAME: &'static str = "transactionLog";

    fn id_column() -> Column {
        Column::Id
    }

    fn sort_column(property: &str) -> Option<Column> {
        match property {
            "id" => Some(Column::Id),
            "timestamp" => Some(Column::Timestamp),
            "operationType" => Some(Column::OperationType),
            "fieldChanged" => Some(Column::FieldChanged),
            "oldValue" => Some(Column::OldValue),
            "newValue" => Some(Column::NewValue),
            "modifiedBy" => Some(Column::ModifiedBy),
            "saleTransaction.id" | "saleTransactionId" => Some(Column::SaleTransactionId),
            _ => None,
        }
    }
}

/// Mutation kinds recorded in `operation_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum OperationType {
    Create,
    Put,
    Patch,
    Delete,
}
