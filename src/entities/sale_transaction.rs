use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One product line of a sale.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((21, 2)))")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((21, 2)))")]
    pub subtotal: Decimal,
    pub product_id: i64,
    pub sale_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id"
    )]
    Sale,
    #[sea_orm(has_many = "super::transaction_log::Entity")]
    TransactionLogs,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::transaction_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl crate::pagination::SortableEntity for Entity {
    const ENTITY_NAME: &'static str = "saleTransaction";

    fn id_column() -> Column {
        Column::Id
    }

    fn sort_column(property: &str) -> Option<Column> {
        match property {
            "id" => Some(Column::Id),
            "quantity" => Some(Column::Quantity),
            "unitPrice" => Some(Column::UnitPrice),
            "subtotal" => Some(Column::Subtotal),
            "product.id" | "productId" => Some(Column::ProductId),
            "sale.id" | "saleId" => Some(Column::SaleId),
            _ => None,
        }
    }
}
