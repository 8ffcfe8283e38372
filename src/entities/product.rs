use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product owned by the inventory system; sale lines only reference it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_transaction::Entity")]
    SaleTransactions,
}

impl Related<super::sale_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
