use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

use crate::engine::CommissionError;
use crate::fees::{BusinessFeeRule, FeeRule, PrivateFeeRule, BUSINESS_CLIENT, PRIVATE_CLIENT};
use crate::models::{OperationType, Transaction};
use crate::rates::ExchangeRates;
use crate::types::{format_fee, round_cents};

const DEPOSIT_FEE_MULTIPLIER: Decimal = dec!(0.0003);

/// Commission fee engine for ordered transaction batches.
///
/// Deposits take a fixed multiplier; withdrawals dispatch to the fee rule
/// registered for the transaction's client type. Transactions are processed
/// strictly in input order, each to completion before the next, because the
/// private rule's weekly state makes later fees depend on earlier ones.
pub struct CommissionEngine {
    rules: HashMap<String, Box<dyn FeeRule>>,
    backpressure: usize
}

impl CommissionEngine {
    /// Creates an engine with the default "private" and "business" rules
    /// registered against the given rate provider.
    pub fn new(rates: Arc<ExchangeRates>) -> Self {
        let mut engine = Self {
            rules: HashMap::new(),
            backpressure: 256
        };

        engine.register(PRIVATE_CLIENT, Box::new(PrivateFeeRule::new(rates)));
        engine.register(BUSINESS_CLIENT, Box::new(BusinessFeeRule));
        engine
    }

    /// Registers (or replaces) the withdrawal fee rule for a client type.
    pub fn register(&mut self, client_type: impl Into<String>, rule: Box<dyn FeeRule>) {
        self.rules.insert(client_type.into(), rule);
    }

    /// The client types currently known to the registry.
    pub fn client_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Orchestrates the end-to-end fee pipeline for a CSV file and returns
    /// one formatted fee per input record, in input order.
    pub async fn run(&mut self, path: &str) -> anyhow::Result<Vec<String>> {
        let (sender, receiver) = mpsc::channel(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let processing_result = self.process_transactions(receiver).await;

        if let Err(join_error) = csv_handle.await {
            error!("CSV ingestion task failed: {join_error}");
        }

        processing_result
    }

    fn spawn_csv_reader(
        &self,
        path: String,
        sender: mpsc::Sender<anyhow::Result<Transaction>>
    ) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    let open_error = anyhow::Error::new(error)
                        .context(format!("Failed to open CSV at path: {path}"));
                    let _ = sender.blocking_send(Err(open_error));
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for (index, result) in reader.records().enumerate() {
                let line = index + 1;
                let transaction = match result {
                    Ok(record) => Transaction::from_record(&record)
                        .with_context(|| format!("Invalid record on line {line}")),
                    Err(error) => Err(anyhow::Error::new(error)
                        .context(format!("Malformed CSV on line {line}")))
                };

                // A bad record fails the whole batch; stop reading once it
                // has been reported, or once the consumer has hung up.
                let stop = transaction.is_err();

                if sender.blocking_send(transaction).is_err() || stop {
                    break;
                }
            }
        })
    }

    async fn process_transactions(
        &mut self,
        mut receiver: mpsc::Receiver<anyhow::Result<Transaction>>
    ) -> anyhow::Result<Vec<String>> {
        let mut fees = Vec::new();

        while let Some(next) = receiver.recv().await {
            let transaction = next?;
            let fee = self.process_transaction(&transaction).await?;

            debug!(
                "Processed {:?} of {} {} for user [{}] -> fee {fee}",
                transaction.operation, transaction.amount, transaction.currency, transaction.user_id
            );

            fees.push(fee);
        }

        Ok(fees)
    }

    /// Computes the formatted fee for a single transaction.
    ///
    /// Deposits never consult the client-type registry; withdrawals for an
    /// unregistered client type fail, naming the type.
    pub async fn process_transaction(
        &mut self,
        transaction: &Transaction
    ) -> Result<String, CommissionError> {
        let fee = match transaction.operation {
            OperationType::Deposit => round_cents(transaction.amount * DEPOSIT_FEE_MULTIPLIER),
            OperationType::Withdraw => {
                let rule = self.rules.get_mut(&transaction.user_type)
                    .ok_or_else(|| CommissionError::UnsupportedClientType {
                        client_type: transaction.user_type.clone()
                    })?;

                rule.calculate_fee(
                    transaction.amount,
                    &transaction.currency,
                    transaction.user_id,
                    transaction.date
                ).await?
            }
        };

        Ok(format_fee(fee))
    }

    /// Processes an in-memory batch, preserving input order.
    pub async fn process_batch(
        &mut self,
        transactions: &[Transaction]
    ) -> Result<Vec<String>, CommissionError> {
        let mut fees = Vec::with_capacity(transactions.len());

        for transaction in transactions {
            fees.push(self.process_transaction(transaction).await?);
        }

        Ok(fees)
    }
}
