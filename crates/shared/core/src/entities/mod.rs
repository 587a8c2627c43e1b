mod contract;
mod trader;
mod transaction;

pub use contract::DerivativeContract;
pub use trader::Trader;
pub use transaction::{Transaction, TransactionView};
