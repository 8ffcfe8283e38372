use super::{CountByCriteriaQuery, FindByCriteriaQuery, Query};
use crate::{
    criteria::TransactionLogCriteria,
    db::DbPool,
    dto::TransactionLogDto,
    errors::ServiceError,
    mappers::{EntityMapper, TransactionLogMapper},
    pagination::{Page, Pageable},
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Filtered reads over the audit trail
#[derive(Debug, Clone)]
pub struct TransactionLogQueryService {
    db: Arc<DbPool>,
}

impl TransactionLogQueryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn find_by_criteria(
        &self,
        criteria: TransactionLogCriteria,
        pageable: Pageable,
    ) -> Result<Page<TransactionLogDto>, ServiceError> {
        debug!("Find transaction logs by criteria");
        let page = FindByCriteriaQuery { criteria, pageable }
            .execute(&self.db)
            .await?;
        Ok(page.map(TransactionLogMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn count_by_criteria(
        &self,
        criteria: TransactionLogCriteria,
    ) -> Result<u64, ServiceError> {
        CountByCriteriaQuery { criteria }.execute(&self.db).await
    }
}
