//! Read-side queries driven by request criteria.

pub mod sale;
pub mod seller;
pub mod transaction_log;

pub use sale::SaleQueryService;
pub use seller::SellerQueryService;
pub use transaction_log::TransactionLogQueryService;

use crate::{
    criteria::Criteria,
    errors::ServiceError,
    pagination::{fetch_page, Page, Pageable},
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Select};

/// Trait representing a generic asynchronous query.
#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    /// Executes the query using the provided database pool.
    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}

/// One page of the rows matching `criteria`.
#[derive(Debug)]
pub struct FindByCriteriaQuery<C> {
    pub criteria: C,
    pub pageable: Pageable,
}

#[async_trait]
impl<C> Query for FindByCriteriaQuery<C>
where
    C: Criteria,
    <C::Entity as EntityTrait>::Model: Sync,
{
    type Result = Page<<C::Entity as EntityTrait>::Model>;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        fetch_page(filtered(&self.criteria), &self.pageable, db_pool).await
    }
}

/// Number of rows matching `criteria`.
#[derive(Debug)]
pub struct CountByCriteriaQuery<C> {
    pub criteria: C,
}

#[async_trait]
impl<C> Query for CountByCriteriaQuery<C>
where
    C: Criteria,
    <C::Entity as EntityTrait>::Model: Sync,
{
    type Result = u64;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        Ok(filtered(&self.criteria).count(db_pool).await?)
    }
}

fn filtered<C: Criteria>(criteria: &C) -> Select<C::Entity> {
    let select = C::Entity::find().filter(criteria.to_condition());
    if criteria.distinct() {
        select.distinct()
    } else {
        select
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{QueryParams, SellerCriteria};
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn distinct_flag_selects_distinct_rows() {
        let params: QueryParams = [("name.equals", "Ada"), ("distinct", "true")]
            .into_iter()
            .collect();
        let criteria = SellerCriteria::from_params(&params).unwrap();

        let sql = filtered(&criteria).build(DbBackend::Postgres).to_string();
        assert!(sql.starts_with("SELECT DISTINCT"), "{sql}");
        assert!(sql.contains(r#""seller"."name" = 'Ada'"#), "{sql}");
    }
}
