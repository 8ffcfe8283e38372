use super::{ensure_deleted, on_delete_violation, on_unique_violation};
use crate::{
    db::{DatabaseAccess, DbPool},
    dto::SellerDto,
    entities::seller,
    errors::ServiceError,
    mappers::{EntityMapper, SellerMapper},
    pagination::{fetch_page, Page, Pageable},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter,
};
use std::sync::Arc;
use tracing::{debug, instrument};

const ENTITY_NAME: &str = "seller";

/// Service for managing sellers
#[derive(Debug, Clone)]
pub struct SellerService {
    db: DatabaseAccess,
}

impl SellerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    /// Creates a seller; the employee code must not be taken.
    #[instrument(skip(self, dto))]
    pub async fn save(&self, dto: SellerDto) -> Result<SellerDto, ServiceError> {
        debug!(employee_code = ?dto.employee_code, "Request to save Seller");
        let active = SellerMapper::to_active_model(None, &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    if let Some(code) = dto.employee_code.as_deref() {
                        ensure_code_available(txn, code, None).await?;
                    }
                    let model = active
                        .insert(txn)
                        .await
                        .map_err(on_unique_violation(ENTITY_NAME, "employeecodeexists"))?;
                    Ok(SellerMapper::to_dto(model))
                })
            })
            .await
    }

    /// Replaces every column of seller `id`.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: SellerDto) -> Result<SellerDto, ServiceError> {
        debug!("Request to update Seller");
        let active = SellerMapper::to_active_model(Some(id), &dto)?;

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    if let Some(code) = dto.employee_code.as_deref() {
                        ensure_code_available(txn, code, Some(id)).await?;
                    }
                    let model = active
                        .update(txn)
                        .await
                        .map_err(on_unique_violation(ENTITY_NAME, "employeecodeexists"))?;
                    Ok(SellerMapper::to_dto(model))
                })
            })
            .await
    }

    /// Merges the fields present in `patch`; `None` when the seller is gone.
    #[instrument(skip(self, patch))]
    pub async fn partial_update(
        &self,
        id: i64,
        patch: SellerDto,
    ) -> Result<Option<SellerDto>, ServiceError> {
        debug!("Request to partially update Seller");

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    let Some(existing) = seller::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(None);
                    };
                    if let Some(code) = patch.employee_code.as_deref() {
                        ensure_code_available(txn, code, Some(id)).await?;
                    }

                    let mut active = existing.clone().into_active_model();
                    SellerMapper::apply_patch(&mut active, &patch);
                    let model = if active.is_changed() {
                        active
                            .update(txn)
                            .await
                            .map_err(on_unique_violation(ENTITY_NAME, "employeecodeexists"))?
                    } else {
                        existing
                    };
                    Ok(Some(SellerMapper::to_dto(model)))
                })
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self, pageable: &Pageable) -> Result<Page<SellerDto>, ServiceError> {
        let page = fetch_page(seller::Entity::find(), pageable, self.db.pool()).await?;
        Ok(page.map(SellerMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i64) -> Result<Option<SellerDto>, ServiceError> {
        let model = seller::Entity::find_by_id(id).one(self.db.pool()).await?;
        Ok(model.map(SellerMapper::to_dto))
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(seller::Entity::find_by_id(id).count(self.db.pool()).await? > 0)
    }

    /// Deletes a seller; fails while sales still reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!("Request to delete Seller");
        let result = seller::Entity::delete_by_id(id)
            .exec(self.db.pool())
            .await
            .map_err(on_delete_violation(ENTITY_NAME, id))?;
        ensure_deleted(result.rows_affected, ENTITY_NAME, id)
    }
}

async fn ensure_code_available<C: ConnectionTrait>(
    db: &C,
    employee_code: &str,
    exclude_id: Option<i64>,
) -> Result<(), ServiceError> {
    let mut query = seller::Entity::find().filter(seller::Column::EmployeeCode.eq(employee_code));
    if let Some(id) = exclude_id {
        query = query.filter(seller::Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(ServiceError::bad_request_alert(
            format!("Employee code {} is already in use", employee_code),
            ENTITY_NAME,
            "employeecodeexists",
        ));
    }
    Ok(())
}
