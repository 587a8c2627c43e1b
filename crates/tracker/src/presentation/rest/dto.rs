use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracker_core::{ContractId, TraderId, Transaction};

use crate::application::{ContractDetails, LogTransactionCommand, TraderDetails};

pub const LOGGED_BODY: &str = "Transaction and related details logged successfully";
pub const LOGGING_FAILED_BODY: &str = "An error occurred while logging the transaction";
pub const NOT_FOUND_BODY: &str = "Transaction not found";

/// Body of `POST /api/transactions/log`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTransactionRequest {
    pub transaction_id: u64,
    pub transaction_type: String,
    pub quantity: u32,
    pub transaction_price: Decimal,

    pub trader_id: u64,
    pub trader_name: String,
    pub trader_account_balance: Decimal,
    pub trader_phone_number: String,

    pub contract_id: u64,
    pub contract_type: String,
    pub contract_strike_price: Decimal,
    /// `YYYY-MM-DD`
    pub contract_expiration_date: NaiveDate,
    pub contract_underlying_asset: String,

    /// Client-observed response time; accepted for compatibility, not used
    #[serde(default)]
    pub response_time: Option<i64>,
}

impl LogTransactionRequest {
    pub fn into_command(self) -> LogTransactionCommand {
        LogTransactionCommand {
            transaction: Transaction::new(
                self.transaction_id,
                self.transaction_type,
                self.quantity,
                self.transaction_price,
            ),
            trader: TraderDetails {
                id: TraderId::new(self.trader_id),
                name: self.trader_name,
                account_balance: self.trader_account_balance,
                phone_number: self.trader_phone_number,
            },
            contract: ContractDetails {
                id: ContractId::new(self.contract_id),
                contract_type: self.contract_type,
                strike_price: self.contract_strike_price,
                expiration_date: self.contract_expiration_date,
                underlying_asset: self.contract_underlying_asset,
            },
        }
    }
}
