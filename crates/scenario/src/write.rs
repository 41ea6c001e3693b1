//! Block test fixture encoder.
//!
//! Output depends only on the model: keys are written in a fixed order per
//! object kind and every value is written as its original text.
use crate::{
    Account, Block, BlockHeader, CheckValue, JsonBigInt, JsonBytes, JsonU64, LogEntry, LogsCheck,
    Test, Transaction, TransactionResult,
};
use serde_json::{Map, Value};

/// Encodes tests as pretty-printed JSON text.
pub fn tests_to_json_string(tests: &[Test]) -> String {
    format!("{:#}", tests_to_ordered_json(tests))
}

/// Encodes tests as a map keyed by test name.
pub fn tests_to_ordered_json(tests: &[Test]) -> Value {
    let mut result = Map::new();
    for test in tests {
        result.insert(test.test_name.clone(), test_to_value(test));
    }
    Value::Object(result)
}

/// Encodes one test.
///
/// `checkGas` is only written when it is `false`, since decoders assume `true`.
pub fn test_to_value(test: &Test) -> Value {
    let mut test_map = Map::new();
    if !test.check_gas {
        test_map.insert("checkGas".into(), Value::Bool(false));
    }
    test_map.insert("pre".into(), accounts_to_value(&test.pre));
    test_map.insert("blocks".into(), list_to_value(&test.blocks, block_to_value));
    test_map.insert("network".into(), Value::String(test.network.clone()));
    test_map.insert(
        "blockhashes".into(),
        list_to_value(&test.block_hashes, bytes_to_value),
    );
    test_map.insert("postState".into(), accounts_to_value(&test.post_state));
    Value::Object(test_map)
}

/// Encodes a log entry as compact JSON text.
pub fn log_to_string(log: &LogEntry) -> String {
    log_to_value(log).to_string()
}

fn accounts_to_value(accounts: &[Account]) -> Value {
    let mut accounts_map = Map::new();
    for account in accounts {
        let mut account_map = Map::new();
        account_map.insert("nonce".into(), int_to_value(&account.nonce));
        account_map.insert("balance".into(), int_to_value(&account.balance));
        let mut storage_map = Map::new();
        for pair in &account.storage {
            storage_map.insert(pair.key.original.clone(), bytes_to_value(&pair.value));
        }
        account_map.insert("storage".into(), Value::Object(storage_map));
        account_map.insert("code".into(), bytes_to_value(&account.code));

        accounts_map.insert(account.address.original.clone(), Value::Object(account_map));
    }
    Value::Object(accounts_map)
}

fn block_to_value(block: &Block) -> Value {
    let mut block_map = Map::new();
    block_map.insert("results".into(), list_to_value(&block.results, result_to_value));
    block_map.insert(
        "transactions".into(),
        list_to_value(&block.transactions, transaction_to_value),
    );
    block_map.insert("blockHeader".into(), block_header_to_value(&block.block_header));
    Value::Object(block_map)
}

fn block_header_to_value(header: &BlockHeader) -> Value {
    let mut header_map = Map::new();
    header_map.insert("gasLimit".into(), int_to_value(&header.gas_limit));
    header_map.insert("number".into(), int_to_value(&header.number));
    header_map.insert("difficulty".into(), int_to_value(&header.difficulty));
    header_map.insert("timestamp".into(), u64_to_value(&header.timestamp));
    header_map.insert("coinbase".into(), int_to_value(&header.beneficiary));
    Value::Object(header_map)
}

fn transaction_to_value(tx: &Transaction) -> Value {
    let mut tx_map = Map::new();
    tx_map.insert("nonce".into(), u64_to_value(&tx.nonce));
    tx_map.insert("function".into(), Value::String(tx.function.clone()));
    tx_map.insert("gasLimit".into(), u64_to_value(&tx.gas_limit));
    tx_map.insert("value".into(), int_to_value(&tx.value));
    tx_map.insert("to".into(), bytes_to_value(&tx.to));
    tx_map.insert("arguments".into(), list_to_value(&tx.arguments, bytes_to_value));
    tx_map.insert("contractCode".into(), bytes_to_value(&tx.code));
    tx_map.insert("gasPrice".into(), u64_to_value(&tx.gas_price));
    tx_map.insert("from".into(), bytes_to_value(&tx.from));
    Value::Object(tx_map)
}

fn result_to_value(result: &TransactionResult) -> Value {
    let mut result_map = Map::new();
    result_map.insert("out".into(), list_to_value(&result.out, bytes_to_value));
    result_map.insert("status".into(), int_to_value(&result.status));
    result_map.insert("message".into(), Value::String(result.message.clone()));
    result_map.insert("gas".into(), checkable_to_value(&result.gas, u64_to_value));
    result_map.insert("logs".into(), logs_to_value(&result.logs));
    result_map.insert(
        "refund".into(),
        checkable_to_value(&result.refund, int_to_value),
    );
    Value::Object(result_map)
}

fn logs_to_value(logs: &LogsCheck) -> Value {
    match logs {
        LogsCheck::Star => Value::String(CheckValue::<()>::STAR.into()),
        LogsCheck::Hash(hash) => Value::String(hash.clone()),
        LogsCheck::List(logs) => list_to_value(logs, log_to_value),
    }
}

fn log_to_value(log: &LogEntry) -> Value {
    let mut log_map = Map::new();
    log_map.insert("address".into(), bytes_to_value(&log.address));
    log_map.insert("identifier".into(), bytes_to_value(&log.identifier));
    log_map.insert("topics".into(), list_to_value(&log.topics, bytes_to_value));
    log_map.insert("data".into(), bytes_to_value(&log.data));
    Value::Object(log_map)
}

fn list_to_value<T>(items: &[T], to_value: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(to_value).collect())
}

fn checkable_to_value<T>(check: &CheckValue<T>, to_value: impl Fn(&T) -> Value) -> Value {
    match check {
        CheckValue::Star => Value::String(CheckValue::<T>::STAR.into()),
        CheckValue::Equal(value) => to_value(value),
    }
}

fn int_to_value(value: &JsonBigInt) -> Value {
    Value::String(value.original.clone())
}

fn u64_to_value(value: &JsonU64) -> Value {
    Value::String(value.original.clone())
}

fn bytes_to_value(value: &JsonBytes) -> Value {
    Value::String(value.original.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageKeyValuePair;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    fn sample_log() -> LogEntry {
        LogEntry {
            address: JsonBytes::parse("0x02").unwrap(),
            identifier: JsonBytes::parse("''transfer").unwrap(),
            topics: vec![JsonBytes::parse("0x01").unwrap()],
            data: JsonBytes::default(),
        }
    }

    fn sample_test() -> Test {
        Test {
            test_name: "adder".to_string(),
            pre: vec![Account {
                address: JsonBytes::parse("''owner").unwrap(),
                nonce: JsonBigInt::parse("0").unwrap(),
                balance: JsonBigInt::parse("1000").unwrap(),
                storage: vec![StorageKeyValuePair {
                    key: JsonBytes::parse("0x01").unwrap(),
                    value: JsonBytes::parse("5").unwrap(),
                }],
                code: JsonBytes::parse("").unwrap(),
            }],
            blocks: vec![Block {
                results: vec![TransactionResult {
                    out: vec![JsonBytes::parse("0x05").unwrap()],
                    gas: CheckValue::Equal(JsonU64::new(1234)),
                    refund: CheckValue::Equal(JsonBigInt::from(0u64)),
                    logs: LogsCheck::List(vec![sample_log()]),
                    ..Default::default()
                }],
                transactions: vec![Transaction {
                    from: JsonBytes::parse("''owner").unwrap(),
                    to: JsonBytes::parse("''sc").unwrap(),
                    function: "add".to_string(),
                    arguments: vec![JsonBytes::parse("3").unwrap()],
                    gas_limit: JsonU64::parse("0x100000").unwrap(),
                    ..Default::default()
                }],
                block_header: BlockHeader {
                    gas_limit: JsonBigInt::parse("1000000").unwrap(),
                    number: JsonBigInt::from(1u64),
                    timestamp: JsonU64::new(1_600_000_000),
                    ..Default::default()
                },
            }],
            network: "default".to_string(),
            block_hashes: vec![JsonBytes::parse("0x00").unwrap()],
            ..Default::default()
        }
    }

    #[test]
    fn test_check_gas_omitted_when_true() {
        let test = Test {
            check_gas: true,
            ..Default::default()
        };
        let value = test_to_value(&test);
        assert_eq!(
            keys(&value),
            ["pre", "blocks", "network", "blockhashes", "postState"]
        );
    }

    #[test]
    fn test_check_gas_written_when_false() {
        let test = Test {
            check_gas: false,
            ..Default::default()
        };
        let value = test_to_value(&test);
        assert_eq!(
            keys(&value),
            ["checkGas", "pre", "blocks", "network", "blockhashes", "postState"]
        );
        assert_eq!(value["checkGas"], json!(false));
    }

    #[test]
    fn test_key_orders() {
        let value = test_to_value(&sample_test());
        let block = &value["blocks"][0];
        assert_eq!(keys(block), ["results", "transactions", "blockHeader"]);
        assert_eq!(
            keys(&block["transactions"][0]),
            [
                "nonce",
                "function",
                "gasLimit",
                "value",
                "to",
                "arguments",
                "contractCode",
                "gasPrice",
                "from"
            ]
        );
        assert_eq!(
            keys(&block["results"][0]),
            ["out", "status", "message", "gas", "logs", "refund"]
        );
        assert_eq!(
            keys(&block["blockHeader"]),
            ["gasLimit", "number", "difficulty", "timestamp", "coinbase"]
        );
        assert_eq!(
            keys(&value["pre"]["''owner"]),
            ["nonce", "balance", "storage", "code"]
        );
    }

    #[test]
    fn test_values_keep_original_text() {
        let value = test_to_value(&sample_test());
        let tx = &value["blocks"][0]["transactions"][0];
        assert_eq!(tx["gasLimit"], json!("0x100000"));
        assert_eq!(tx["nonce"], json!("0"));
        assert_eq!(tx["value"], json!("0x00"));
        assert_eq!(tx["arguments"], json!(["3"]));
        assert_eq!(tx["contractCode"], json!(""));

        let header = &value["blocks"][0]["blockHeader"];
        assert_eq!(header["gasLimit"], json!("1000000"));
        assert_eq!(header["number"], json!("0x01"));
        assert_eq!(header["timestamp"], json!("1600000000"));

        let account = &value["pre"]["''owner"];
        assert_eq!(account["balance"], json!("1000"));
        assert_eq!(account["storage"], json!({ "0x01": "5" }));
        assert_eq!(value["blockhashes"], json!(["0x00"]));
    }

    #[test]
    fn test_logs_encoding_precedence() {
        let encode = |logs: LogsCheck| {
            result_to_value(&TransactionResult {
                logs,
                ..Default::default()
            })["logs"]
                .clone()
        };

        let all_set = LogsCheck::from_parts(true, "0xabcd", vec![sample_log()]);
        assert_eq!(encode(all_set), json!("*"));

        let hash_and_list = LogsCheck::from_parts(false, "0xabcd", vec![sample_log()]);
        assert_eq!(encode(hash_and_list), json!("0xabcd"));

        let list = LogsCheck::from_parts(false, "", vec![sample_log()]);
        assert_eq!(
            encode(list),
            json!([{ "address": "0x02", "identifier": "''transfer", "topics": ["0x01"], "data": "" }])
        );

        assert_eq!(encode(LogsCheck::from_parts(false, "", Vec::new())), json!([]));
    }

    #[test]
    fn test_unchecked_result_fields() {
        let value = result_to_value(&TransactionResult::default());
        assert_eq!(
            value,
            json!({
                "out": [],
                "status": "0x00",
                "message": "",
                "gas": "*",
                "logs": "*",
                "refund": "*"
            })
        );
    }

    #[test]
    fn test_tests_keyed_by_name() {
        let second = Test {
            test_name: "second".to_string(),
            check_gas: false,
            ..Default::default()
        };
        let value = tests_to_ordered_json(&[sample_test(), second]);
        assert_eq!(keys(&value), ["adder", "second"]);
        assert_eq!(value["second"]["checkGas"], json!(false));
    }

    #[test]
    fn test_json_string_is_deterministic() {
        let tests = [sample_test()];
        let text = tests_to_json_string(&tests);
        assert_eq!(text, tests_to_json_string(&tests));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tests_to_ordered_json(&tests));
        assert!(text.find("\"pre\"").unwrap() < text.find("\"postState\"").unwrap());
    }

    #[test]
    fn test_log_to_string() {
        assert_eq!(
            log_to_string(&sample_log()),
            r#"{"address":"0x02","identifier":"''transfer","topics":["0x01"],"data":""}"#
        );
    }
}
