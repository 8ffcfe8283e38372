//! Field-by-field conversion between entity models and DTOs.

mod sale;
mod sale_transaction;
mod seller;
mod transaction_log;

pub use sale::SaleMapper;
pub use sale_transaction::SaleTransactionMapper;
pub use seller::SellerMapper;
pub use transaction_log::TransactionLogMapper;

use crate::errors::ServiceError;
use sea_orm::{ActiveModelTrait, EntityTrait};

pub trait EntityMapper {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + Send;
    type Dto;

    /// DTO with related rows referenced by id only.
    fn to_dto(model: <Self::Entity as EntityTrait>::Model) -> Self::Dto;

    /// Active model with every column set from `dto`.
    ///
    /// `id` of `None` leaves the key for the database to generate.
    fn to_active_model(id: Option<i64>, dto: &Self::Dto) -> Result<Self::ActiveModel, ServiceError>;

    /// Sets the columns `patch` carries and returns their JSON names.
    fn apply_patch(active: &mut Self::ActiveModel, patch: &Self::Dto) -> Vec<&'static str>;
}

pub(crate) fn required<T: Clone>(value: &Option<T>, field: &str) -> Result<T, ServiceError> {
    value
        .clone()
        .ok_or_else(|| ServiceError::ValidationError(format!("{} must not be null", field)))
}
