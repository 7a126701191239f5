pub mod exchange_service;
pub mod query_service;
pub mod summary_service;

pub use exchange_service::{ExchangeError, ExchangeService, ExportDocument};
pub use query_service::{QueryService, TransactionQuery, TypeFilter};
pub use summary_service::{SummaryService, Totals};
