use crate::{CheckValue, JsonBigInt, JsonBytes, JsonU64};

/// Log emitted by a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting account.
    pub address: JsonBytes,
    /// Event identifier.
    pub identifier: JsonBytes,
    /// Indexed topics.
    pub topics: Vec<JsonBytes>,
    /// Log payload.
    pub data: JsonBytes,
}

/// Expected logs of a transaction.
///
/// Documents write this as `"*"`, a hash string, or a list of log entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LogsCheck {
    /// Logs are not checked.
    #[default]
    Star,
    /// Logs must hash to the given value.
    Hash(String),
    /// Logs must equal this list.
    List(Vec<LogEntry>),
}

impl LogsCheck {
    /// Builds the check from loose parts.
    ///
    /// `ignore_logs` takes precedence over a non-empty `log_hash`, which takes
    /// precedence over `logs`.
    pub fn from_parts(ignore_logs: bool, log_hash: impl Into<String>, logs: Vec<LogEntry>) -> Self {
        let log_hash = log_hash.into();
        if ignore_logs {
            Self::Star
        } else if !log_hash.is_empty() {
            Self::Hash(log_hash)
        } else {
            Self::List(logs)
        }
    }

    /// Returns `true` if logs are not checked.
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }
}

/// Expected outcome of a transaction.
///
/// The default expects status `0`, no output and an empty message, and leaves
/// gas, refund and logs unchecked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionResult {
    /// Returned values in order.
    pub out: Vec<JsonBytes>,
    /// Return code.
    pub status: JsonBigInt,
    /// Return message.
    pub message: String,
    /// Remaining gas.
    pub gas: CheckValue<JsonU64>,
    /// Gas refund.
    pub refund: CheckValue<JsonBigInt>,
    /// Emitted logs.
    pub logs: LogsCheck,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> LogEntry {
        LogEntry {
            address: JsonBytes::parse("0x01").unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_logs_ignore_wins() {
        let check = LogsCheck::from_parts(true, "0xabcd", vec![log()]);
        assert_eq!(check, LogsCheck::Star);
        assert!(check.is_star());
    }

    #[test]
    fn test_logs_hash_before_list() {
        let check = LogsCheck::from_parts(false, "0xabcd", vec![log()]);
        assert_eq!(check, LogsCheck::Hash("0xabcd".to_string()));
    }

    #[test]
    fn test_logs_list() {
        assert_eq!(
            LogsCheck::from_parts(false, "", vec![log()]),
            LogsCheck::List(vec![log()])
        );
        assert_eq!(LogsCheck::from_parts(false, "", Vec::new()), LogsCheck::List(Vec::new()));
    }
}
