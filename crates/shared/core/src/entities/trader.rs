use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{TraderId, TransactionId};

/// Trader that placed a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trader {
    pub id: TraderId,
    pub name: String,
    pub account_balance: Decimal,
    pub phone_number: String,
    /// Transaction this trader record is attached to
    pub transaction_id: TransactionId,
}

impl Trader {
    pub fn new(
        id: impl Into<TraderId>,
        name: impl Into<String>,
        account_balance: Decimal,
        phone_number: impl Into<String>,
        transaction_id: TransactionId,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_balance,
            phone_number: phone_number.into(),
            transaction_id,
        }
    }
}
