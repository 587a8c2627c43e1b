use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::TransactionId;

/// A logged trade on a derivative contract
///
/// Immutable once logged: the record store is the source of truth and the
/// metrics aggregator only ever refers to it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub transaction_type: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        transaction_type: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_type: transaction_type.into(),
            quantity,
            price,
        }
    }

    /// Human-readable projection of the four transaction fields
    pub fn view(&self) -> TransactionView {
        TransactionView {
            id: self.id,
            transaction_type: self.transaction_type.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Read model returned by transaction lookups
///
/// `Display` renders the plain-text body served by the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub transaction_type: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl fmt::Display for TransactionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction ID: {}\nType: {}\nQuantity: {}\nPrice: {}",
            self.id, self.transaction_type, self.quantity, self.price
        )
    }
}
