use super::value::{
    node_kind, parse_big_int, parse_bytes, parse_bytes_list, parse_checkable, parse_list,
    parse_map, parse_string, parse_u64,
};
use crate::{
    error::WithContext, DecodeError, FileResolver, LogEntry, LogsCheck, Parser, Transaction,
    TransactionResult, TransactionType,
};
use serde_json::Value;

impl<R: FileResolver> Parser<R> {
    /// Decodes a transaction. Which fields are allowed depends on `tx_type`:
    ///
    /// * `scCall`: `from`, `to`, `value`, `function`, `arguments`, `gasLimit`, `gasPrice`
    /// * `scDeploy`: `from`, `value`, `contractCode`, `arguments`, `gasLimit`, `gasPrice`
    /// * `transfer`: `from`, `to`, `value`
    pub(super) fn parse_tx(
        &self,
        tx_type: TransactionType,
        value: &Value,
    ) -> Result<Transaction, DecodeError> {
        let mut tx = Transaction {
            tx_type,
            ..Default::default()
        };
        let mut has_from = false;
        let mut has_to = false;
        for (key, value) in parse_map(value, "transaction")? {
            match key.as_str() {
                "from" => {
                    tx.from = parse_bytes(value).context("from")?;
                    has_from = true;
                }
                "to" if tx_type.has_receiver() => {
                    tx.to = parse_bytes(value).context("to")?;
                    has_to = true;
                }
                "value" => tx.value = parse_big_int(value).context("value")?,
                "function" if tx_type == TransactionType::ScCall => {
                    tx.function = parse_string(value).context("function")?
                }
                "arguments" if tx_type.is_smart_contract_tx() => {
                    tx.arguments = parse_bytes_list(value).context("arguments")?
                }
                "contractCode" if tx_type == TransactionType::ScDeploy => {
                    tx.code = self.parse_code(value).context("contractCode")?
                }
                "gasLimit" if tx_type.is_smart_contract_tx() => {
                    tx.gas_limit = parse_u64(value).context("gasLimit")?
                }
                "gasPrice" if tx_type.is_smart_contract_tx() => {
                    tx.gas_price = parse_u64(value).context("gasPrice")?
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "transaction",
                        key: key.clone(),
                    })
                }
            }
        }

        if !has_from {
            return Err(DecodeError::MissingField {
                object: "transaction",
                key: "from",
            });
        }
        if tx_type.has_receiver() && !has_to {
            return Err(DecodeError::MissingField {
                object: "transaction",
                key: "to",
            });
        }
        Ok(tx)
    }

    /// Omitted fields take the [`TransactionResult`] defaults.
    pub(super) fn parse_tx_expected_result(
        value: &Value,
    ) -> Result<TransactionResult, DecodeError> {
        let mut result = TransactionResult::default();
        for (key, value) in parse_map(value, "expected result")? {
            match key.as_str() {
                "out" => result.out = parse_bytes_list(value).context("out")?,
                "status" => result.status = parse_big_int(value).context("status")?,
                "message" => result.message = parse_string(value).context("message")?,
                "gas" => result.gas = parse_checkable(value, parse_u64).context("gas")?,
                "refund" => result.refund = parse_checkable(value, parse_big_int).context("refund")?,
                "logs" => result.logs = parse_logs(value).context("logs")?,
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "expected result",
                        key: key.clone(),
                    })
                }
            }
        }
        Ok(result)
    }
}

/// `"*"`, a log hash, or a list of log entries.
fn parse_logs(value: &Value) -> Result<LogsCheck, DecodeError> {
    match value {
        Value::String(text) => Ok(LogsCheck::from_parts(
            text == "*",
            text.as_str(),
            Vec::new(),
        )),
        Value::Array(_) => parse_list(value, "logs")?
            .iter()
            .enumerate()
            .map(|(index, log)| parse_log_entry(log).context(format!("log {index}")))
            .collect::<Result<Vec<_>, _>>()
            .map(LogsCheck::List),
        other => Err(DecodeError::WrongType {
            expected: "string or list",
            found: node_kind(other),
        }),
    }
}

fn parse_log_entry(value: &Value) -> Result<LogEntry, DecodeError> {
    let mut log = LogEntry::default();
    for (key, value) in parse_map(value, "log entry")? {
        match key.as_str() {
            "address" => log.address = parse_bytes(value).context("address")?,
            "identifier" => log.identifier = parse_bytes(value).context("identifier")?,
            "topics" => log.topics = parse_bytes_list(value).context("topics")?,
            "data" => log.data = parse_bytes(value).context("data")?,
            _ => {
                return Err(DecodeError::UnknownField {
                    object: "log entry",
                    key: key.clone(),
                })
            }
        }
    }
    Ok(log)
}
