//! Sale transaction CRUD with an audit row for every mutation.
//!
//! Each create, replace, merge and delete writes one `transaction_log` row in
//! the same database transaction as the change it describes, so the audit
//! trail and the data cannot diverge.

use super::{ensure_deleted, ensure_exists, transaction_log::AuditRecord};
use crate::{
    db::{DatabaseAccess, DbPool},
    dto::SaleTransactionDto,
    entities::{product, sale, sale_transaction, transaction_log::OperationType},
    errors::ServiceError,
    mappers::{EntityMapper, SaleTransactionMapper},
    pagination::{fetch_page, Page, Pageable},
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, LoaderTrait, PaginatorTrait,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const ENTITY_NAME: &str = "saleTransaction";

/// Service for managing sale transactions
#[derive(Debug, Clone)]
pub struct SaleTransactionService {
    db: DatabaseAccess,
}

impl SaleTransactionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn save(&self, dto: SaleTransactionDto) -> Result<SaleTransactionDto, ServiceError> {
        debug!(quantity = ?dto.quantity, "Request to save SaleTransaction");
        let active = SaleTransactionMapper::to_active_model(None, &dto)?;

        let model = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    check_references(txn, &dto).await?;
                    let model = active.insert(txn).await?;
                    AuditRecord::new(OperationType::Create, model.id)
                        .after(&model)?
                        .write(txn)
                        .await?;
                    Ok(model)
                })
            })
            .await?;

        info!(sale_transaction_id = model.id, "Sale transaction created");
        Ok(SaleTransactionMapper::to_dto(model))
    }

    #[instrument(skip(self, dto))]
    pub async fn update(
        &self,
        id: i64,
        dto: SaleTransactionDto,
    ) -> Result<SaleTransactionDto, ServiceError> {
        debug!("Request to update SaleTransaction");
        let active = SaleTransactionMapper::to_active_model(Some(id), &dto)?;

        let model = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    let before = find_existing(txn, id).await?;
                    check_references(txn, &dto).await?;
                    let model = active.update(txn).await?;
                    AuditRecord::new(OperationType::Put, id)
                        .before(&before)?
                        .after(&model)?
                        .write(txn)
                        .await?;
                    Ok(model)
                })
            })
            .await?;

        Ok(SaleTransactionMapper::to_dto(model))
    }

    /// Merges the fields present in `patch`; `None` when the row is gone.
    #[instrument(skip(self, patch))]
    pub async fn partial_update(
        &self,
        id: i64,
        patch: SaleTransactionDto,
    ) -> Result<Option<SaleTransactionDto>, ServiceError> {
        debug!("Request to partially update SaleTransaction");

        let model = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    let Some(before) = sale_transaction::Entity::find_by_id(id).one(txn).await?
                    else {
                        return Ok(None);
                    };
                    check_references(txn, &patch).await?;

                    let mut active = before.clone().into_active_model();
                    let changed = SaleTransactionMapper::apply_patch(&mut active, &patch);
                    let model = if active.is_changed() {
                        active.update(txn).await?
                    } else {
                        before.clone()
                    };

                    AuditRecord::new(OperationType::Patch, id)
                        .fields(&changed)
                        .before(&before)?
                        .after(&model)?
                        .write(txn)
                        .await?;
                    Ok(Some(model))
                })
            })
            .await?;

        Ok(model.map(SaleTransactionMapper::to_dto))
    }

    /// One page of transactions; `eagerload` fills product names.
    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        pageable: &Pageable,
        eagerload: bool,
    ) -> Result<Page<SaleTransactionDto>, ServiceError> {
        let db = self.db.pool();
        let mut page = fetch_page(sale_transaction::Entity::find(), pageable, db).await?;
        let content = to_dtos(db, std::mem::take(&mut page.content), eagerload).await?;
        Ok(page.with_content(content))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i64) -> Result<Option<SaleTransactionDto>, ServiceError> {
        let db = self.db.pool();
        let Some(model) = sale_transaction::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Ok(to_dtos(db, vec![model], true).await?.pop())
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(sale_transaction::Entity::find_by_id(id)
            .count(self.db.pool())
            .await?
            > 0)
    }

    /// Records the deletion, then removes the row.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!("Request to delete SaleTransaction");

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    let before = find_existing(txn, id).await?;
                    delete_audited(txn, before).await
                })
            })
            .await
    }
}

/// Writes the DELETE audit row for `model`, then removes it.
pub(crate) async fn delete_audited<C: ConnectionTrait>(
    db: &C,
    model: sale_transaction::Model,
) -> Result<(), ServiceError> {
    let id = model.id;
    AuditRecord::new(OperationType::Delete, id)
        .before(&model)?
        .write(db)
        .await?;
    let result = sale_transaction::Entity::delete_by_id(id).exec(db).await?;
    ensure_deleted(result.rows_affected, ENTITY_NAME, id)
}

async fn find_existing<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<sale_transaction::Model, ServiceError> {
    sale_transaction::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} {} not found", ENTITY_NAME, id)))
}

async fn check_references<C: ConnectionTrait>(
    db: &C,
    dto: &SaleTransactionDto,
) -> Result<(), ServiceError> {
    if let Some(product) = &dto.product {
        ensure_exists::<product::Entity, _>(db, product.id, ENTITY_NAME, "product").await?;
    }
    if let Some(sale) = &dto.sale {
        ensure_exists::<sale::Entity, _>(db, sale.id, ENTITY_NAME, "sale").await?;
    }
    Ok(())
}

async fn to_dtos<C: ConnectionTrait>(
    db: &C,
    models: Vec<sale_transaction::Model>,
    eagerload: bool,
) -> Result<Vec<SaleTransactionDto>, ServiceError> {
    if !eagerload || models.is_empty() {
        return Ok(models
            .into_iter()
            .map(SaleTransactionMapper::to_dto)
            .collect());
    }

    let products = models.load_one(product::Entity, db).await?;
    Ok(models
        .into_iter()
        .zip(products)
        .map(|(model, product)| SaleTransactionMapper::to_dto_with(model, product))
        .collect())
}
