//! Transactional operations behind the REST resources, one service per entity.
//!
//! Handlers validate path and body ids before calling in; services assume the
//! id they receive is the one to act on.

pub mod sale;
pub mod sale_transaction;
pub mod seller;
pub mod transaction_log;

pub use sale::SaleService;
pub use sale_transaction::SaleTransactionService;
pub use seller::SellerService;
pub use transaction_log::TransactionLogService;

use crate::errors::ServiceError;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, PrimaryKeyTrait, SqlErr};

/// Fails with `<reference>notfound` when the referenced row is missing.
pub(crate) async fn ensure_exists<E, C>(
    db: &C,
    id: i64,
    entity_name: &str,
    reference: &str,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
    i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    if E::find_by_id(id).count(db).await? == 0 {
        return Err(ServiceError::bad_request_alert(
            format!("Referenced {} {} does not exist", reference, id),
            entity_name,
            format!("{}notfound", reference.to_lowercase()),
        ));
    }
    Ok(())
}

/// Maps a unique-constraint violation to a keyed 400, anything else to a database error.
pub(crate) fn on_unique_violation(
    entity_name: &'static str,
    error_key: &'static str,
) -> impl Fn(DbErr) -> ServiceError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ServiceError::bad_request_alert(detail, entity_name, error_key)
        }
        _ => ServiceError::DatabaseError(err),
    }
}

/// Returns `NotFound` when a delete matched no row.
pub(crate) fn ensure_deleted(
    rows_affected: u64,
    entity: &str,
    id: i64,
) -> Result<(), ServiceError> {
    if rows_affected == 0 {
        return Err(ServiceError::NotFound(format!("{} {} not found", entity, id)));
    }
    Ok(())
}

/// Maps a foreign-key violation raised by a delete to `Conflict`.
pub(crate) fn on_delete_violation(entity: &'static str, id: i64) -> impl Fn(DbErr) -> ServiceError {
    move |err| match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::Conflict(format!(
            "{} {} is still referenced by other records",
            entity, id
        )),
        _ => ServiceError::DatabaseError(err),
    }
}
