use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracker_clock::{RequestStart, RequestTimer};
use tracker_core::{
    ContractId, DerivativeContract, MetricsSummary, Observation, ResponseStatus, TraderId, Trader,
    Transaction, TransactionId, TransactionView,
};
use tracker_ports::{
    Clock, ContractRepository, MetricsRepository, RecordedTransaction, StoreError, StoreResult,
    TraderRepository, TransactionRepository,
};

use super::MetricsRecorder;
use crate::error::{LoggingError, Result};
use crate::infrastructure::KeyedGuard;

/// Trader fields as supplied by the caller; linked to the transaction on save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraderDetails {
    pub id: TraderId,
    pub name: String,
    pub account_balance: Decimal,
    pub phone_number: String,
}

/// Contract fields as supplied by the caller; linked to the transaction on save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDetails {
    pub id: ContractId,
    pub contract_type: String,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    pub underlying_asset: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTransactionCommand {
    pub transaction: Transaction,
    pub trader: TraderDetails,
    pub contract: ContractDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTransactionResult {
    /// Canonical record as held by the record store
    pub transaction: Transaction,
    /// Whether this call created the transaction record
    pub created: bool,
    pub summary: MetricsSummary,
}

/// Orchestrates logging a transaction and folding its request timing
///
/// One call persists the transaction, its trader and its contract, then
/// folds the elapsed time into the transaction's metrics summary. The whole
/// sequence runs under the per-transaction lock.
pub struct TransactionLoggingService<C, T, TR, CR, M>
where
    C: Clock,
    T: TransactionRepository,
    TR: TraderRepository,
    CR: ContractRepository,
    M: MetricsRepository,
{
    timer: RequestTimer<C>,
    transactions: Arc<T>,
    traders: Arc<TR>,
    contracts: Arc<CR>,
    recorder: MetricsRecorder<C, M>,
}

impl<C, T, TR, CR, M> TransactionLoggingService<C, T, TR, CR, M>
where
    C: Clock,
    T: TransactionRepository,
    TR: TraderRepository,
    CR: ContractRepository,
    M: MetricsRepository,
{
    pub fn new(
        clock: Arc<C>,
        transactions: Arc<T>,
        traders: Arc<TR>,
        contracts: Arc<CR>,
        metrics: Arc<M>,
    ) -> Self {
        Self {
            timer: RequestTimer::new(Arc::clone(&clock)),
            transactions,
            traders,
            contracts,
            recorder: MetricsRecorder::new(clock, metrics),
        }
    }

    /// Timer sharing this service's clock; request handlers start it on entry
    pub fn timer(&self) -> &RequestTimer<C> {
        &self.timer
    }

    /// Log a transaction and fold this request's timing into its metrics
    ///
    /// The status code is validated before anything is written. If any store
    /// fails part way, every write this call already made is undone: new
    /// records are removed and overwritten ones are put back.
    pub async fn log_transaction(
        &self,
        command: LogTransactionCommand,
        started: RequestStart,
        status_code: u16,
    ) -> Result<LogTransactionResult> {
        let status = ResponseStatus::from_code(status_code)?;
        let transaction_id = command.transaction.id;

        let guard = self.recorder.lock(transaction_id).await;
        let mut rollback = Rollback::default();

        match self
            .persist_and_fold(&guard, command, started, status, &mut rollback)
            .await
        {
            Ok((recorded, summary)) => {
                tracing::info!(
                    transaction_id = %transaction_id,
                    created = recorded.created,
                    count = summary.observation_count,
                    "Transaction logged"
                );
                Ok(LogTransactionResult {
                    transaction: recorded.transaction,
                    created: recorded.created,
                    summary,
                })
            }
            Err(source) => {
                self.roll_back(transaction_id, rollback).await;
                Err(self.failed(transaction_id, source))
            }
        }
    }

    /// Fold an externally measured observation into a logged transaction
    ///
    /// Returns `Ok(None)` and writes nothing when the id was never logged.
    pub async fn record_observation(
        &self,
        transaction_id: TransactionId,
        elapsed_ms: i64,
        status_code: u16,
    ) -> Result<Option<MetricsSummary>> {
        let observation = Observation::new(elapsed_ms, status_code)?;

        let guard = self.recorder.lock(transaction_id).await;
        let known = self
            .transactions
            .get(transaction_id)
            .await
            .map_err(|source| self.failed(transaction_id, source))?;
        if known.is_none() {
            tracing::debug!(
                transaction_id = %transaction_id,
                "Observation for unknown transaction dropped"
            );
            return Ok(None);
        }

        self.recorder
            .record_held(&guard, &observation)
            .await
            .map(Some)
            .map_err(|source| self.failed(transaction_id, source))
    }

    /// Look up a logged transaction; `None` when the id was never logged
    pub async fn get_transaction_summary(
        &self,
        transaction_id: TransactionId,
    ) -> StoreResult<Option<TransactionView>> {
        let transaction = self.transactions.get(transaction_id).await?;
        Ok(transaction.map(|t| t.view()))
    }

    /// Current metrics summary for a transaction
    pub async fn metrics_summary(
        &self,
        transaction_id: TransactionId,
    ) -> StoreResult<Option<MetricsSummary>> {
        self.recorder.summary(transaction_id).await
    }

    async fn persist_and_fold(
        &self,
        guard: &KeyedGuard<TransactionId>,
        command: LogTransactionCommand,
        started: RequestStart,
        status: ResponseStatus,
        rollback: &mut Rollback,
    ) -> StoreResult<(RecordedTransaction, MetricsSummary)> {
        let transaction_id = *guard.key();
        let LogTransactionCommand {
            transaction,
            trader,
            contract,
        } = command;

        let recorded = self.transactions.record(transaction).await?;
        rollback.transaction = if recorded.created {
            Some(TransactionUndo::Remove(transaction_id))
        } else {
            recorded.replaced.clone().map(TransactionUndo::Restore)
        };

        let trader_id = trader.id;
        let replaced = self
            .traders
            .save(Trader::new(
                trader.id,
                trader.name,
                trader.account_balance,
                trader.phone_number,
                transaction_id,
            ))
            .await?;
        rollback.trader = Some((trader_id, replaced));

        let contract_id = contract.id;
        let replaced = self
            .contracts
            .save(DerivativeContract::new(
                contract.id,
                contract.contract_type,
                contract.strike_price,
                contract.expiration_date,
                contract.underlying_asset,
                transaction_id,
            ))
            .await?;
        rollback.contract = Some((contract_id, replaced));

        let observation = Observation::with_status(self.timer.elapsed_ms(&started), status);
        let summary = self.recorder.record_held(guard, &observation).await?;

        Ok((recorded, summary))
    }

    /// Undo the writes of a failed logging, newest first
    async fn roll_back(&self, transaction_id: TransactionId, rollback: Rollback) {
        if let Some((id, replaced)) = rollback.contract {
            let undone = match replaced {
                Some(previous) => self.contracts.save(previous).await.map(drop),
                None => self.contracts.remove(id).await.map(drop),
            };
            report_undo(transaction_id, "contract", undone);
        }

        if let Some((id, replaced)) = rollback.trader {
            let undone = match replaced {
                Some(previous) => self.traders.save(previous).await.map(drop),
                None => self.traders.remove(id).await.map(drop),
            };
            report_undo(transaction_id, "trader", undone);
        }

        if let Some(undo) = rollback.transaction {
            let undone = match undo {
                TransactionUndo::Remove(id) => self.transactions.remove(id).await.map(drop),
                TransactionUndo::Restore(previous) => self.transactions.restore(previous).await,
            };
            report_undo(transaction_id, "transaction", undone);
        }
    }

    fn failed(&self, transaction_id: TransactionId, source: StoreError) -> LoggingError {
        tracing::error!(
            transaction_id = %transaction_id,
            error = %source,
            "Logging failed"
        );
        LoggingError::failed(transaction_id, source)
    }
}

/// Writes made so far by one logging call
#[derive(Default)]
struct Rollback {
    transaction: Option<TransactionUndo>,
    /// Trader id written, with the trader it overwrote
    trader: Option<(TraderId, Option<Trader>)>,
    /// Contract id written, with the contract it overwrote
    contract: Option<(ContractId, Option<DerivativeContract>)>,
}

enum TransactionUndo {
    Remove(TransactionId),
    Restore(Transaction),
}

fn report_undo(transaction_id: TransactionId, record: &str, undone: StoreResult<()>) {
    match undone {
        Ok(()) => tracing::warn!(
            transaction_id = %transaction_id,
            record,
            "Rolled back write after failed logging"
        ),
        Err(e) => tracing::error!(
            transaction_id = %transaction_id,
            record,
            error = %e,
            "Could not roll back write after failed logging"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        InMemoryContractRepository, InMemoryMetricsRepository, InMemoryTraderRepository,
        InMemoryTransactionRepository,
    };
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use tracker_clock::ManualClock;
    use tracker_core::InvalidObservation;
    use tracker_ports::{DuplicatePolicy, StoreKind};

    /// Metrics store whose writes always fail
    struct DownMetricsRepository;

    #[async_trait]
    impl MetricsRepository for DownMetricsRepository {
        async fn load(&self, _id: TransactionId) -> StoreResult<Option<MetricsSummary>> {
            Ok(None)
        }

        async fn upsert(&self, _summary: MetricsSummary) -> StoreResult<()> {
            Err(StoreError::unavailable(StoreKind::Metrics, "connection refused"))
        }
    }

    type Service<M> = TransactionLoggingService<
        ManualClock,
        InMemoryTransactionRepository,
        InMemoryTraderRepository,
        InMemoryContractRepository,
        M,
    >;

    struct Fixture<M: MetricsRepository> {
        clock: Arc<ManualClock>,
        transactions: Arc<InMemoryTransactionRepository>,
        traders: Arc<InMemoryTraderRepository>,
        contracts: Arc<InMemoryContractRepository>,
        service: Service<M>,
    }

    fn fixture_with<M: MetricsRepository>(policy: DuplicatePolicy, metrics: M) -> Fixture<M> {
        let clock = Arc::new(ManualClock::epoch());
        let transactions = Arc::new(InMemoryTransactionRepository::with_policy(policy));
        let traders = Arc::new(InMemoryTraderRepository::new());
        let contracts = Arc::new(InMemoryContractRepository::new());
        let service = TransactionLoggingService::new(
            Arc::clone(&clock),
            Arc::clone(&transactions),
            Arc::clone(&traders),
            Arc::clone(&contracts),
            Arc::new(metrics),
        );
        Fixture {
            clock,
            transactions,
            traders,
            contracts,
            service,
        }
    }

    fn fixture(policy: DuplicatePolicy) -> Fixture<InMemoryMetricsRepository> {
        fixture_with(policy, InMemoryMetricsRepository::new())
    }

    fn command(id: u64, quantity: u32) -> LogTransactionCommand {
        LogTransactionCommand {
            transaction: Transaction::new(id, "BUY", quantity, dec!(152.75)),
            trader: TraderDetails {
                id: TraderId::new(500 + id),
                name: "Alice".to_string(),
                account_balance: dec!(25000),
                phone_number: "555-0100".to_string(),
            },
            contract: ContractDetails {
                id: ContractId::new(900 + id),
                contract_type: "CALL".to_string(),
                strike_price: dec!(150),
                expiration_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
                underlying_asset: "AAPL".to_string(),
            },
        }
    }

    async fn log_after(
        f: &Fixture<impl MetricsRepository>,
        cmd: LogTransactionCommand,
        elapsed_ms: i64,
        status: u16,
    ) -> Result<LogTransactionResult> {
        let started = f.service.timer().start();
        f.clock.advance_millis(elapsed_ms);
        f.service.log_transaction(cmd, started, status).await
    }

    #[tokio::test]
    async fn test_log_persists_everything_and_folds_timing() {
        let f = fixture(DuplicatePolicy::KeepExisting);

        let result = log_after(&f, command(1001, 10), 120, 201).await.unwrap();

        assert!(result.created);
        assert_eq!(result.summary.observation_count, 1);
        assert_eq!(result.summary.min_response_time_ms, Some(120));
        assert_eq!(result.summary.max_response_time_ms, Some(120));
        assert_eq!(result.summary.avg_response_time_ms, 120);
        assert_eq!(result.summary.last_status, "201 Created");

        let id = TransactionId::new(1001);
        let traders = f.traders.find_by_transaction(id).await.unwrap();
        let contracts = f.contracts.find_by_transaction(id).await.unwrap();
        assert_eq!(traders.len(), 1);
        assert_eq!(traders[0].id, TraderId::new(1501));
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].underlying_asset, "AAPL");
        assert_eq!(f.service.metrics_summary(id).await.unwrap(), Some(result.summary));
    }

    #[tokio::test]
    async fn test_repeated_logs_fold_into_one_summary() {
        let f = fixture(DuplicatePolicy::KeepExisting);

        log_after(&f, command(7, 10), 80, 201).await.unwrap();
        let second = log_after(&f, command(7, 99), 200, 201).await.unwrap();

        assert!(!second.created);
        // first facts stay canonical
        assert_eq!(second.transaction.quantity, 10);
        assert_eq!(second.summary.observation_count, 2);
        assert_eq!(second.summary.min_response_time_ms, Some(80));
        assert_eq!(second.summary.max_response_time_ms, Some(200));
        assert_eq!(second.summary.avg_response_time_ms, 140);
    }

    #[tokio::test]
    async fn test_replace_policy_updates_facts() {
        let f = fixture(DuplicatePolicy::Replace);

        log_after(&f, command(7, 10), 5, 201).await.unwrap();
        let second = log_after(&f, command(7, 99), 5, 201).await.unwrap();

        assert_eq!(second.transaction.quantity, 99);
        let view = f
            .service
            .get_transaction_summary(TransactionId::new(7))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.quantity, 99);
        assert_eq!(second.summary.observation_count, 2);
    }

    #[tokio::test]
    async fn test_reject_policy_fails_without_folding() {
        let f = fixture(DuplicatePolicy::Reject);
        let id = TransactionId::new(7);

        log_after(&f, command(7, 10), 5, 201).await.unwrap();
        let err = log_after(&f, command(7, 99), 5, 201).await.unwrap_err();

        assert_eq!(err, LoggingError::failed(id, StoreError::DuplicateTransaction(id)));
        let summary = f.service.metrics_summary(id).await.unwrap().unwrap();
        assert_eq!(summary.observation_count, 1);
        // the first record survives the rejected duplicate
        assert_eq!(f.transactions.get(id).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_unknown_status_writes_nothing() {
        let f = fixture(DuplicatePolicy::KeepExisting);

        let err = log_after(&f, command(3, 1), 10, 42).await.unwrap_err();

        assert_eq!(
            err,
            LoggingError::InvalidObservation(InvalidObservation::UnknownStatus(42))
        );
        assert!(f.transactions.is_empty());
        assert!(
            f.traders
                .find_by_transaction(TransactionId::new(3))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(f.service.metrics_summary(TransactionId::new(3)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_metrics_failure_removes_new_transaction() {
        let f = fixture_with(DuplicatePolicy::KeepExisting, DownMetricsRepository);
        let id = TransactionId::new(11);

        let err = log_after(&f, command(11, 1), 10, 201).await.unwrap_err();

        assert!(matches!(
            err,
            LoggingError::LoggingFailed {
                transaction_id,
                source: StoreError::Unavailable { store: StoreKind::Metrics, .. },
            } if transaction_id == id
        ));
        assert!(err.is_retryable());
        assert_eq!(f.service.get_transaction_summary(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_metrics_failure_removes_new_trader_and_contract() {
        let f = fixture_with(DuplicatePolicy::KeepExisting, DownMetricsRepository);
        let id = TransactionId::new(11);

        log_after(&f, command(11, 1), 10, 201).await.unwrap_err();

        assert!(f.traders.find_by_transaction(id).await.unwrap().is_empty());
        assert!(f.contracts.find_by_transaction(id).await.unwrap().is_empty());
        assert_eq!(f.traders.get(TraderId::new(511)).await.unwrap(), None);
        assert_eq!(f.contracts.get(ContractId::new(911)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_metrics_failure_restores_overwritten_records() {
        let f = fixture_with(DuplicatePolicy::Replace, DownMetricsRepository);
        let id = TransactionId::new(7);
        let before = command(7, 10);
        let contract = before.contract.clone();
        f.transactions.record(before.transaction.clone()).await.unwrap();
        f.traders
            .save(Trader::new(
                before.trader.id,
                "Alice",
                dec!(25000),
                "555-0100",
                id,
            ))
            .await
            .unwrap();
        f.contracts
            .save(DerivativeContract::new(
                contract.id,
                contract.contract_type,
                contract.strike_price,
                contract.expiration_date,
                contract.underlying_asset,
                id,
            ))
            .await
            .unwrap();

        let mut replacement = command(7, 99);
        replacement.trader.account_balance = dec!(1);
        replacement.contract.contract_type = "PUT".to_string();
        log_after(&f, replacement, 10, 201).await.unwrap_err();

        assert_eq!(f.transactions.get(id).await.unwrap(), Some(before.transaction));
        let trader = f.traders.get(TraderId::new(507)).await.unwrap().unwrap();
        assert_eq!(trader.account_balance, dec!(25000));
        let contract = f.contracts.get(ContractId::new(907)).await.unwrap().unwrap();
        assert_eq!(contract.contract_type, "CALL");
    }

    #[tokio::test]
    async fn test_clock_running_backwards_records_zero() {
        let f = fixture(DuplicatePolicy::KeepExisting);

        let result = log_after(&f, command(5, 1), -30, 201).await.unwrap();

        assert_eq!(result.summary.min_response_time_ms, Some(0));
        assert_eq!(result.summary.avg_response_time_ms, 0);
    }

    #[tokio::test]
    async fn test_record_observation_rejects_negative_elapsed() {
        let f = fixture(DuplicatePolicy::KeepExisting);
        let id = TransactionId::new(9);
        log_after(&f, command(9, 1), 40, 201).await.unwrap();

        let err = f.service.record_observation(id, -1, 200).await.unwrap_err();

        assert_eq!(
            err,
            LoggingError::InvalidObservation(InvalidObservation::NegativeElapsed(-1))
        );
        assert!(!err.is_retryable());
        let summary = f.service.metrics_summary(id).await.unwrap().unwrap();
        assert_eq!(summary.observation_count, 1);
        assert_eq!(summary.last_status, "201 Created");
    }

    #[tokio::test]
    async fn test_record_observation_folds_into_logged_transaction() {
        let f = fixture(DuplicatePolicy::KeepExisting);
        let id = TransactionId::new(9);
        log_after(&f, command(9, 1), 80, 201).await.unwrap();

        let summary = f.service.record_observation(id, 200, 200).await.unwrap().unwrap();

        assert_eq!(summary.observation_count, 2);
        assert_eq!(summary.avg_response_time_ms, 140);
        assert_eq!(summary.last_status, "200 OK");
    }

    #[tokio::test]
    async fn test_record_observation_ignores_unknown_transaction() {
        let f = fixture(DuplicatePolicy::KeepExisting);
        let id = TransactionId::new(404);

        let summary = f.service.record_observation(id, 10, 200).await.unwrap();

        assert_eq!(summary, None);
        assert!(f.service.metrics_summary(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_transaction_summary() {
        let f = fixture(DuplicatePolicy::KeepExisting);
        log_after(&f, command(1001, 25), 1, 201).await.unwrap();

        let view = f
            .service
            .get_transaction_summary(TransactionId::new(1001))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            view.to_string(),
            "Transaction ID: 1001\nType: BUY\nQuantity: 25\nPrice: 152.75"
        );
        assert_eq!(
            f.service
                .get_transaction_summary(TransactionId::new(1))
                .await
                .unwrap(),
            None
        );
    }
}
