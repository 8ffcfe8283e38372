pub mod common;
pub mod health;
pub mod sale_transactions;
pub mod sales;
pub mod sellers;
pub mod transaction_logs;

use crate::{
    db::DbPool,
    queries::{SaleQueryService, SellerQueryService, TransactionLogQueryService},
    services::{SaleService, SaleTransactionService, SellerService, TransactionLogService},
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer used by the HTTP handlers
#[derive(Clone, Debug)]
pub struct AppServices {
    pub sellers: Arc<SellerService>,
    pub seller_queries: Arc<SellerQueryService>,
    pub sales: Arc<SaleService>,
    pub sale_queries: Arc<SaleQueryService>,
    pub sale_transactions: Arc<SaleTransactionService>,
    pub transaction_logs: Arc<TransactionLogService>,
    pub transaction_log_queries: Arc<TransactionLogQueryService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            sellers: Arc::new(SellerService::new(db_pool.clone())),
            seller_queries: Arc::new(SellerQueryService::new(db_pool.clone())),
            sales: Arc::new(SaleService::new(db_pool.clone())),
            sale_queries: Arc::new(SaleQueryService::new(db_pool.clone())),
            sale_transactions: Arc::new(SaleTransactionService::new(db_pool.clone())),
            transaction_logs: Arc::new(TransactionLogService::new(db_pool.clone())),
            transaction_log_queries: Arc::new(TransactionLogQueryService::new(db_pool)),
        }
    }
}
