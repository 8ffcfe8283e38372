use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sale closed by a seller for a client. Lines live in `sale_transaction`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    #[sea_orm(column_type = "Decimal(Some((21, 2)))")]
    pub total: Decimal,
    pub client_id: i64,
    pub seller_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
    #[sea_orm(has_many = "super::sale_transaction::Entity")]
    Transactions,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::sale_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl crate::pagination::SortableEntity for Entity {
    const ENTITY_NAME: &'static str = "sale";

    fn id_column() -> Column {
        Column::Id
    }

    fn sort_column(property: &str) -> Option<Column> {
        match property {
            "id" => Some(Column::Id),
            "creationDate" => Some(Column::CreationDate),
            "total" => Some(Column::Total),
            "client.id" | "clientId" => Some(Column::ClientId),
            "seller.id" | "sellerId" => Some(Column::SellerId),
            _ => None,
        }
    }
}
