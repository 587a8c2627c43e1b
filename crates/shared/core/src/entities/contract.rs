use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{ContractId, TransactionId};

/// Derivative contract a transaction was traded on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeContract {
    pub id: ContractId,
    /// e.g. "CALL", "PUT", "FUTURE"
    pub contract_type: String,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    pub underlying_asset: String,
    /// Transaction this contract record is attached to
    pub transaction_id: TransactionId,
}

impl DerivativeContract {
    pub fn new(
        id: impl Into<ContractId>,
        contract_type: impl Into<String>,
        strike_price: Decimal,
        expiration_date: NaiveDate,
        underlying_asset: impl Into<String>,
        transaction_id: TransactionId,
    ) -> Self {
        Self {
            id: id.into(),
            contract_type: contract_type.into(),
            strike_price,
            expiration_date,
            underlying_asset: underlying_asset.into(),
            transaction_id,
        }
    }
}

