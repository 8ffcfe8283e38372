use super::{ensure_deleted, ensure_exists, sale_transaction::delete_audited};
use crate::{
    db::{DatabaseAccess, DbPool},
    dto::SaleDto,
    entities::{client, sale, sale_transaction, seller},
    errors::ServiceError,
    mappers::{EntityMapper, SaleMapper},
    pagination::{fetch_page, Page, Pageable},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use tracing::{debug, instrument};

const ENTITY_NAME: &str = "sale";

/// Service for managing sales
#[derive(Debug, Clone)]
pub struct SaleService {
    db: DatabaseAccess,
}

impl SaleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn save(&self, dto: SaleDto) -> Result<SaleDto, ServiceError> {
        debug!(total = ?dto.total, "Request to save Sale");
        let active = SaleMapper::to_active_model(None, &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    check_references(txn, &dto).await?;
                    let model = active.insert(txn).await?;
                    Ok(SaleMapper::to_dto(model))
                })
            })
            .await
    }

    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: SaleDto) -> Result<SaleDto, ServiceError> {
        debug!("Request to update Sale");
        let active = SaleMapper::to_active_model(Some(id), &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    check_references(txn, &dto).await?;
                    let model = active.update(txn).await?;
                    Ok(SaleMapper::to_dto(model))
                })
            })
            .await
    }

    #[instrument(skip(self, patch))]
    pub async fn partial_update(
        &self,
        id: i64,
        patch: SaleDto,
    ) -> Result<Option<SaleDto>, ServiceError> {
        debug!("Request to partially update Sale");

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    let Some(existing) = sale::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(None);
                    };
                    check_references(txn, &patch).await?;

                    let mut active = existing.clone().into_active_model();
                    SaleMapper::apply_patch(&mut active, &patch);
                    let model = if active.is_changed() {
                        active.update(txn).await?
                    } else {
                        existing
                    };
                    Ok(Some(SaleMapper::to_dto(model)))
                })
            })
            .await
    }

    /// One page of sales; `eagerload` fills client names and seller codes.
    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        pageable: &Pageable,
        eagerload: bool,
    ) -> Result<Page<SaleDto>, ServiceError> {
        let db = self.db.pool();
        let mut page = fetch_page(sale::Entity::find(), pageable, db).await?;
        let content = to_dtos(db, std::mem::take(&mut page.content), eagerload).await?;
        Ok(page.with_content(content))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i64) -> Result<Option<SaleDto>, ServiceError> {
        let db = self.db.pool();
        let Some(model) = sale::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Ok(to_dtos(db, vec![model], true).await?.pop())
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(sale::Entity::find_by_id(id).count(self.db.pool()).await? > 0)
    }

    /// Deletes a sale together with its transactions, auditing each one.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!("Request to delete Sale");

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    let lines = sale_transaction::Entity::find()
                        .filter(sale_transaction::Column::SaleId.eq(id))
                        .order_by_asc(sale_transaction::Column::Id)
                        .all(txn)
                        .await?;
                    for line in lines {
                        delete_audited(txn, line).await?;
                    }
                    let result = sale::Entity::delete_by_id(id).exec(txn).await?;
                    ensure_deleted(result.rows_affected, ENTITY_NAME, id)
                })
            })
            .await
    }
}

/// Checks the client and seller a sale body points at, when it names them.
async fn check_references<C: ConnectionTrait>(db: &C, dto: &SaleDto) -> Result<(), ServiceError> {
    if let Some(client) = &dto.client {
        ensure_exists::<client::Entity, _>(db, client.id, ENTITY_NAME, "client").await?;
    }
    if let Some(seller) = &dto.seller {
        ensure_exists::<seller::Entity, _>(db, seller.id, ENTITY_NAME, "seller").await?;
    }
    Ok(())
}

/// Maps sale rows to DTOs, batch-loading their client and seller when asked.
pub(crate) async fn to_dtos<C: ConnectionTrait>(
    db: &C,
    models: Vec<sale::Model>,
    eagerload: bool,
) -> Result<Vec<SaleDto>, ServiceError> {
    if !eagerload || models.is_empty() {
        return Ok(models.into_iter().map(SaleMapper::to_dto).collect());
    }

    let clients = models.load_one(client::Entity, db).await?;
    let sellers = models.load_one(seller::Entity, db).await?;
    Ok(models
        .into_iter()
        .zip(clients)
        .zip(sellers)
        .map(|((model, client), seller)| SaleMapper::to_dto_with(model, client, seller))
        .collect())
}
