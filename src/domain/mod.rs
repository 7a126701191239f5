pub mod common;
pub mod transaction;

pub use common::{Displayable, Identifiable};
pub use transaction::{
    Category, Transaction, TransactionDate, TransactionId, TransactionInput, TransactionKind,
};
