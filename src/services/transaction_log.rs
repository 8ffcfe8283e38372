use super::{ensure_deleted, ensure_exists};
use crate::{
    db::{DatabaseAccess, DbPool},
    dto::TransactionLogDto,
    entities::{
        sale_transaction,
        transaction_log::{self, OperationType},
    },
    errors::ServiceError,
    mappers::{EntityMapper, SaleTransactionMapper, TransactionLogMapper},
    pagination::{fetch_page, Page, Pageable},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, Set,
};
use std::sync::Arc;
use tracing::{debug, instrument};

const ENTITY_NAME: &str = "transactionLog";

/// Author recorded on audit rows written by the service itself.
pub const MODIFIED_BY: &str = "system";

/// Longest snapshot kept in `old_value` / `new_value`.
pub const MAX_SNAPSHOT_CHARS: usize = 500;

const ALL_FIELDS: &str = "*";

/// Audit row describing one mutation of a sale transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuditRecord {
    operation: OperationType,
    sale_transaction_id: i64,
    field_changed: String,
    old_value: Option<String>,
    new_value: Option<String>,
}

impl AuditRecord {
    pub(crate) fn new(operation: OperationType, sale_transaction_id: i64) -> Self {
        Self {
            operation,
            sale_transaction_id,
            field_changed: ALL_FIELDS.to_string(),
            old_value: None,
            new_value: None,
        }
    }

    /// Names the fields a merge actually touched.
    pub(crate) fn fields(mut self, names: &[&str]) -> Self {
        self.field_changed = names.join(",");
        self
    }

    pub(crate) fn before(mut self, model: &sale_transaction::Model) -> Result<Self, ServiceError> {
        self.old_value = Some(snapshot(model)?);
        Ok(self)
    }

    pub(crate) fn after(mut self, model: &sale_transaction::Model) -> Result<Self, ServiceError> {
        self.new_value = Some(snapshot(model)?);
        Ok(self)
    }

    pub(crate) async fn write<C: ConnectionTrait>(
        self,
        db: &C,
    ) -> Result<transaction_log::Model, ServiceError> {
        let entry = transaction_log::ActiveModel {
            id: NotSet,
            timestamp: Set(Utc::now()),
            operation_type: Set(self.operation.to_string()),
            field_changed: Set(self.field_changed),
            old_value: Set(self.old_value),
            new_value: Set(self.new_value),
            modified_by: Set(MODIFIED_BY.to_string()),
            sale_transaction_id: Set(Some(self.sale_transaction_id)),
        }
        .insert(db)
        .await?;

        debug!(
            transaction_log_id = entry.id,
            operation = %entry.operation_type,
            sale_transaction_id = self.sale_transaction_id,
            "Audit row written"
        );
        Ok(entry)
    }
}

fn snapshot(model: &sale_transaction::Model) -> Result<String, ServiceError> {
    let json = serde_json::to_string(&SaleTransactionMapper::to_dto(model.clone()))?;
    Ok(truncate_chars(json, MAX_SNAPSHOT_CHARS))
}

fn truncate_chars(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}

/// Service for managing transaction logs
#[derive(Debug, Clone)]
pub struct TransactionLogService {
    db: DatabaseAccess,
}

impl TransactionLogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn save(&self, dto: TransactionLogDto) -> Result<TransactionLogDto, ServiceError> {
        debug!(operation_type = ?dto.operation_type, "Request to save TransactionLog");
        let active = TransactionLogMapper::to_active_model(None, &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    check_reference(txn, &dto).await?;
                    Ok(TransactionLogMapper::to_dto(active.insert(txn).await?))
                })
            })
            .await
    }

    #[instrument(skip(self, dto))]
    pub async fn update(
        &self,
        id: i64,
        dto: TransactionLogDto,
    ) -> Result<TransactionLogDto, ServiceError> {
        debug!("Request to update TransactionLog");
        let active = TransactionLogMapper::to_active_model(Some(id), &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    check_reference(txn, &dto).await?;
                    Ok(TransactionLogMapper::to_dto(active.update(txn).await?))
                })
            })
            .await
    }

    #[instrument(skip(self, patch))]
    pub async fn partial_update(
        &self,
        id: i64,
        patch: TransactionLogDto,
    ) -> Result<Option<TransactionLogDto>, ServiceError> {
        debug!("Request to partially update TransactionLog");

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    let Some(existing) = transaction_log::Entity::find_by_id(id).one(txn).await?
                    else {
                        return Ok(None);
                    };
                    check_reference(txn, &patch).await?;

                    let mut active = existing.clone().into_active_model();
                    TransactionLogMapper::apply_patch(&mut active, &patch);
                    let model = if active.is_changed() {
                        active.update(txn).await?
                    } else {
                        existing
                    };
                    Ok(Some(TransactionLogMapper::to_dto(model)))
                })
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        pageable: &Pageable,
    ) -> Result<Page<TransactionLogDto>, ServiceError> {
        let page = fetch_page(transaction_log::Entity::find(), pageable, self.db.pool()).await?;
        Ok(page.map(TransactionLogMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i64) -> Result<Option<TransactionLogDto>, ServiceError> {
        let model = transaction_log::Entity::find_by_id(id)
            .one(self.db.pool())
            .await?;
        Ok(model.map(TransactionLogMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(transaction_log::Entity::find_by_id(id)
            .count(self.db.pool())
            .await?
            > 0)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!("Request to delete TransactionLog");
        let result = transaction_log::Entity::delete_by_id(id)
            .exec(self.db.pool())
            .await?;
        ensure_deleted(result.rows_affected, ENTITY_NAME, id)
    }
}

async fn check_reference<C: ConnectionTrait>(
    db: &C,
    dto: &TransactionLogDto,
) -> Result<(), ServiceError> {
    if let Some(reference) = &dto.sale_transaction {
        ensure_exists::<sale_transaction::Entity, _>(db, reference.id, ENTITY_NAME, "saleTransaction")
            .await?;
    }
    Ok(())
}
