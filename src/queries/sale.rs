use super::{CountByCriteriaQuery, FindByCriteriaQuery, Query};
use crate::{
    criteria::SaleCriteria,
    db::DbPool,
    dto::SaleDto,
    errors::ServiceError,
    pagination::{Page, Pageable},
    services::sale::to_dtos,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Filtered reads over sales
#[derive(Debug, Clone)]
pub struct SaleQueryService {
    db: Arc<DbPool>,
}

impl SaleQueryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn find_by_criteria(
        &self,
        criteria: SaleCriteria,
        pageable: Pageable,
        eagerload: bool,
    ) -> Result<Page<SaleDto>, ServiceError> {
        debug!("Find sales by criteria");
        let mut page = FindByCriteriaQuery { criteria, pageable }
            .execute(&self.db)
            .await?;
        let content = to_dtos(self.db.as_ref(), std::mem::take(&mut page.content), eagerload).await?;
        Ok(page.with_content(content))
    }

    #[instrument(skip(self))]
    pub async fn count_by_criteria(&self, criteria: SaleCriteria) -> Result<u64, ServiceError> {
        CountByCriteriaQuery { criteria }.execute(&self.db).await
    }
}
