use super::{CountByCriteriaQuery, FindByCriteriaQuery, Query};
use crate::{
    criteria::SellerCriteria,
    db::DbPool,
    dto::SellerDto,
    errors::ServiceError,
    mappers::{EntityMapper, SellerMapper},
    pagination::{Page, Pageable},
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Filtered reads over sellers
#[derive(Debug, Clone)]
pub struct SellerQueryService {
    db: Arc<DbPool>,
}

impl SellerQueryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn find_by_criteria(
        &self,
        criteria: SellerCriteria,
        pageable: Pageable,
    ) -> Result<Page<SellerDto>, ServiceError> {
        debug!("Find sellers by criteria");
        let page = FindByCriteriaQuery { criteria, pageable }
            .execute(&self.db)
            .await?;
        Ok(page.map(SellerMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn count_by_criteria(&self, criteria: SellerCriteria) -> Result<u64, ServiceError> {
        CountByCriteriaQuery { criteria }.execute(&self.db).await
    }
}
