use super::value::{parse_big_int, parse_bytes, parse_checkable, parse_list, parse_map, parse_u64};
use crate::{
    error::WithContext, Account, CheckAccount, CheckAccounts, DecodeError, FileResolver,
    JsonBytes, NewAddressMock, Parser, StorageKeyValuePair,
};
use serde_json::Value;

/// Key in a check state account map that allows unlisted accounts.
const OTHER_ACCOUNTS_ALLOWED: &str = "+";

impl<R: FileResolver> Parser<R> {
    pub(super) fn parse_account_map(&self, value: &Value) -> Result<Vec<Account>, DecodeError> {
        parse_map(value, "accounts")?
            .iter()
            .map(|(address, value)| {
                self.parse_account(address, value)
                    .context(format!("account {address}"))
            })
            .collect()
    }

    /// Omitted fields are zero or empty.
    fn parse_account(&self, address: &str, value: &Value) -> Result<Account, DecodeError> {
        let mut account = Account {
            address: JsonBytes::parse(address).context("bad address")?,
            ..Default::default()
        };
        for (key, value) in parse_map(value, "account")? {
            match key.as_str() {
                "nonce" => account.nonce = parse_big_int(value).context("nonce")?,
                "balance" => account.balance = parse_big_int(value).context("balance")?,
                "storage" => account.storage = parse_storage(value).context("storage")?,
                "code" => account.code = self.parse_code(value).context("code")?,
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "account",
                        key: key.clone(),
                    })
                }
            }
        }
        Ok(account)
    }

    pub(super) fn parse_check_account_map(
        &self,
        value: &Value,
    ) -> Result<CheckAccounts, DecodeError> {
        let mut check_accounts = CheckAccounts::default();
        for (address, value) in parse_map(value, "accounts")? {
            if address == OTHER_ACCOUNTS_ALLOWED {
                check_accounts.other_accounts_allowed = true;
                continue;
            }
            let account = self
                .parse_check_account(address, value)
                .context(format!("account {address}"))?;
            check_accounts.accounts.push(account);
        }
        Ok(check_accounts)
    }

    /// Omitted fields are not checked.
    fn parse_check_account(
        &self,
        address: &str,
        value: &Value,
    ) -> Result<CheckAccount, DecodeError> {
        let mut account = CheckAccount {
            address: JsonBytes::parse(address).context("bad address")?,
            ..Default::default()
        };
        for (key, value) in parse_map(value, "account")? {
            match key.as_str() {
                "nonce" => account.nonce = parse_checkable(value, parse_big_int).context("nonce")?,
                "balance" => {
                    account.balance = parse_checkable(value, parse_big_int).context("balance")?
                }
                "storage" => {
                    account.storage = parse_checkable(value, parse_storage).context("storage")?
                }
                "code" => {
                    account.code =
                        parse_checkable(value, |value| self.parse_code(value)).context("code")?
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "check account",
                        key: key.clone(),
                    })
                }
            }
        }
        Ok(account)
    }

    pub(super) fn parse_new_address_mocks(
        value: &Value,
    ) -> Result<Vec<NewAddressMock>, DecodeError> {
        parse_list(value, "new addresses")?
            .iter()
            .enumerate()
            .map(|(index, item)| parse_new_address_mock(item).context(format!("item {index}")))
            .collect()
    }
}

fn parse_storage(value: &Value) -> Result<Vec<StorageKeyValuePair>, DecodeError> {
    parse_map(value, "storage")?
        .iter()
        .map(|(key, value)| -> Result<_, DecodeError> {
            Ok(StorageKeyValuePair {
                key: JsonBytes::parse(key).context(format!("bad storage key {key:?}"))?,
                value: parse_bytes(value).context(format!("bad storage value for {key}"))?,
            })
        })
        .collect()
}

fn parse_new_address_mock(value: &Value) -> Result<NewAddressMock, DecodeError> {
    let mut creator_address = None;
    let mut creator_nonce = None;
    let mut new_address = None;
    for (key, value) in parse_map(value, "new address")? {
        match key.as_str() {
            "creatorAddress" => {
                creator_address = Some(parse_bytes(value).context("creatorAddress")?)
            }
            "creatorNonce" => creator_nonce = Some(parse_u64(value).context("creatorNonce")?),
            "newAddress" => new_address = Some(parse_bytes(value).context("newAddress")?),
            _ => {
                return Err(DecodeError::UnknownField {
                    object: "new address",
                    key: key.clone(),
                })
            }
        }
    }
    let missing = |key| DecodeError::MissingField {
        object: "new address",
        key,
    };
    Ok(NewAddressMock {
        creator_address: creator_address.ok_or_else(|| missing("creatorAddress"))?,
        creator_nonce: creator_nonce.ok_or_else(|| missing("creatorNonce"))?,
        new_address: new_address.ok_or_else(|| missing("newAddress"))?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        decode_scenario, CheckValue, DecodeError, DefaultFileResolver, JsonBigInt, Parser, Step,
    };
    use num_bigint::BigInt;
    use serde_json::json;

    fn set_state(accounts: serde_json::Value) -> crate::SetStateStep {
        let scenario = decode_scenario(&json!({
            "steps": [{ "step": "setState", "accounts": accounts }]
        }))
        .unwrap();
        match scenario.steps.into_iter().next() {
            Some(Step::SetState(step)) => step,
            other => panic!("expected set state step, got {other:?}"),
        }
    }

    #[test]
    fn test_account_defaults() {
        let step = set_state(json!({ "''alice": {} }));
        let account = &step.accounts[0];
        assert_eq!(account.address.value, b"alice");
        assert_eq!(account.nonce.value, BigInt::from(0));
        assert_eq!(account.balance, JsonBigInt::default());
        assert!(account.storage.is_empty());
        assert!(account.code.is_empty());
    }

    #[test]
    fn test_account_storage_keeps_order_and_text() {
        let step = set_state(json!({
            "0x01": { "storage": { "0x02": "5", "''key": "0x0a", "0x01": "" } }
        }));
        let storage = &step.accounts[0].storage;
        let keys: Vec<_> = storage.iter().map(|pair| pair.key.original.as_str()).collect();
        assert_eq!(keys, ["0x02", "''key", "0x01"]);
        assert_eq!(storage[0].value.value, vec![5]);
        assert_eq!(storage[0].value.original, "5");
        assert!(storage[2].value.is_empty());
    }

    #[test]
    fn test_unknown_account_field() {
        let err = decode_scenario(&json!({
            "steps": [{ "step": "setState", "accounts": { "0x01": { "nonce": "1", "owner": "0x02" } } }]
        }))
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DecodeError::UnknownField { object: "account", key } if key == "owner"
        ));
        assert!(err.to_string().contains("account 0x01"));
    }

    #[test]
    fn test_new_addresses_and_block_hashes() {
        let scenario = decode_scenario(&json!({
            "steps": [{
                "step": "setState",
                "newAddresses": [{
                    "creatorAddress": "''owner",
                    "creatorNonce": "0",
                    "newAddress": "''sc"
                }],
                "blockhashes": ["0x01", "0x02"]
            }]
        }))
        .unwrap();
        let Step::SetState(step) = &scenario.steps[0] else {
            panic!("expected set state step");
        };
        assert_eq!(step.new_address_mocks.len(), 1);
        assert_eq!(step.new_address_mocks[0].creator_address.value, b"owner");
        assert_eq!(step.new_address_mocks[0].creator_nonce.value, 0);
        assert_eq!(step.new_address_mocks[0].new_address.value, b"sc");
        assert_eq!(step.block_hashes.len(), 2);
    }

    #[test]
    fn test_new_address_missing_field() {
        let err = decode_scenario(&json!({
            "steps": [{
                "step": "setState",
                "newAddresses": [{ "creatorAddress": "''owner", "creatorNonce": "0" }]
            }]
        }))
        .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DecodeError::MissingField { key: "newAddress", .. }
        ));
    }

    #[test]
    fn test_check_accounts() {
        let scenario = decode_scenario(&json!({
            "steps": [{
                "step": "checkState",
                "accounts": {
                    "''alice": { "nonce": "1", "balance": "*", "storage": "*" },
                    "''sc": { "storage": { "0x01": "0x02" }, "code": "0x0061" },
                    "+": ""
                }
            }]
        }))
        .unwrap();
        let Step::CheckState(step) = &scenario.steps[0] else {
            panic!("expected check state step");
        };
        let check = &step.check_accounts;
        assert!(check.other_accounts_allowed);
        assert_eq!(check.accounts.len(), 2);

        let alice = check.get(b"alice").unwrap();
        assert_eq!(alice.nonce, CheckValue::Equal(JsonBigInt::parse("1").unwrap()));
        assert!(alice.balance.is_star());
        assert!(alice.storage.is_star());
        assert!(alice.code.is_star());

        let sc = check.get(b"sc").unwrap();
        assert!(sc.nonce.is_star());
        assert_eq!(sc.storage.as_option().unwrap().len(), 1);
        assert_eq!(sc.code.as_option().unwrap().value, vec![0x00, 0x61]);
    }

    #[test]
    fn test_check_accounts_exact_by_default() {
        let scenario = decode_scenario(&json!({
            "steps": [{ "step": "checkState", "accounts": { "''alice": {} } }]
        }))
        .unwrap();
        let Step::CheckState(step) = &scenario.steps[0] else {
            panic!("expected check state step");
        };
        assert!(!step.check_accounts.other_accounts_allowed);
    }

    #[test]
    fn test_code_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("adder.wasm"), [0x00, 0x61, 0x73, 0x6d]).unwrap();

        let parser = Parser::new(DefaultFileResolver::new(dir.path()));
        let scenario = parser
            .parse_scenario(&json!({
                "steps": [{
                    "step": "setState",
                    "accounts": { "''sc": { "code": "file:adder.wasm" } }
                }]
            }))
            .unwrap();
        let Step::SetState(step) = &scenario.steps[0] else {
            panic!("expected set state step");
        };
        assert_eq!(step.accounts[0].code.value, vec![0x00, 0x61, 0x73, 0x6d]);
        assert_eq!(step.accounts[0].code.original, "file:adder.wasm");
    }

    #[test]
    fn test_code_file_not_resolved() {
        let err = decode_scenario(&json!({
            "steps": [{
                "step": "setState",
                "accounts": { "''sc": { "code": "file:adder.wasm" } }
            }]
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), DecodeError::File { .. }));
    }
}
