//! Request and response bodies.
//!
//! One DTO per entity serves POST, PUT and PATCH alike. Required fields are
//! `Option`s tagged `required` so a missing value surfaces as a field-level
//! validation error instead of a deserialization failure; a PATCH body is
//! checked with [`validate_patch`], which skips those presence checks.

pub mod reference;
pub mod sale;
pub mod sale_transaction;
pub mod seller;
pub mod transaction_log;

pub use reference::{ClientRefDto, ProductRefDto, SaleRefDto, SaleTransactionRefDto, SellerRefDto};
pub use sale::SaleDto;
pub use sale_transaction::SaleTransactionDto;
pub use seller::SellerDto;
pub use transaction_log::TransactionLogDto;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

/// Common shape of every entity DTO.
pub trait EntityDto: Validate + Send + Sync {
    fn id(&self) -> Option<i64>;
}

/// Validates only the constraints on fields a merge-patch actually carries.
pub fn validate_patch<T: Validate>(dto: &T) -> Result<(), ValidationErrors> {
    let errors = match dto.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut kept = ValidationErrors::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter().filter(|e| e.code != "required") {
            kept.add(field, err.clone());
        }
    }

    if kept.errors().is_empty() {
        Ok(())
    } else {
        Err(kept)
    }
}

pub(crate) fn validate_decimal_min_zero(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("decimal_min_zero");
        err.message = Some("must be greater than or equal to 0".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn patch_validation_ignores_missing_fields_but_not_bad_values() {
        let patch = SellerDto {
            id: Some(1),
            name: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let errors = validate_patch(&patch).unwrap_err();
        let fields: Vec<_> = errors.field_errors().into_keys().collect();
        assert_eq!(fields, vec!["name"]);

        let sparse = SellerDto {
            id: Some(1),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        };
        assert!(validate_patch(&sparse).is_ok());
    }

    #[test]
    fn decimal_min_zero() {
        assert!(validate_decimal_min_zero(&dec!(0)).is_ok());
        assert!(validate_decimal_min_zero(&dec!(0.01)).is_ok());
        assert!(validate_decimal_min_zero(&dec!(-0.01)).is_err());
    }
}
