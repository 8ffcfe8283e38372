//! sea-orm entity definitions.
//!
//! `client` and `product` mirror tables owned by other systems and are only
//! read here; the remaining entities are managed by this service.

pub mod client;
pub mod product;
pub mod sale;
pub mod sale_transaction;
pub mod seller;
pub mod transaction_log;
