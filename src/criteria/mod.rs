//! Query-string filters ("criteria") and their translation into SQL predicates.
//!
//! A request such as `GET /api/sellers?name.contains=ann&id.greaterThan=10`
//! becomes a [`SellerCriteria`] whose [`Criteria::to_condition`] ANDs one
//! predicate per operator present.

mod filter;
mod params;
mod sale;
mod seller;
mod transaction_log;

pub use filter::{RangeFilter, StringFilter};
pub use params::QueryParams;
pub use sale::SaleCriteria;
pub use seller::SellerCriteria;
pub use transaction_log::TransactionLogCriteria;

use crate::pagination::SortableEntity;
use sea_orm::Condition;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("Invalid value '{value}' for filter parameter '{parameter}'")]
    InvalidValue { parameter: String, value: String },
}

impl CriteriaError {
    fn invalid_value(field: &str, op: &str, raw: &str) -> Self {
        CriteriaError::InvalidValue {
            parameter: format!("{}.{}", field, op),
            value: raw.to_string(),
        }
    }
}

/// A typed set of optional per-field filters over one entity.
pub trait Criteria: Sized + Send + Sync + std::fmt::Debug {
    type Entity: SortableEntity;

    fn from_params(params: &QueryParams) -> Result<Self, CriteriaError>;

    /// Conjunction of every filter that is set; empty when none are.
    fn to_condition(&self) -> Condition;

    fn distinct(&self) -> bool;

    /// True when no filter is set and `distinct` is off.
    fn is_unfiltered(&self) -> bool {
        !self.distinct() && self.to_condition().is_empty()
    }
}

fn parse_distinct(params: &QueryParams) -> Result<Option<bool>, CriteriaError> {
    params
        .get("distinct")
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| CriteriaError::InvalidValue {
                    parameter: "distinct".to_string(),
                    value: raw.to_string(),
                })
        })
        .transpose()
}
