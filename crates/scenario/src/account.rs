use crate::{CheckValue, JsonBigInt, JsonBytes};

/// Single storage slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageKeyValuePair {
    /// Storage key.
    pub key: JsonBytes,
    /// Stored value.
    pub value: JsonBytes,
}

/// Account information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    /// Account address
    pub address: JsonBytes,
    /// Account nonce (transaction count)
    pub nonce: JsonBigInt,
    /// Account balance
    pub balance: JsonBigInt,
    /// Account storage in document order
    pub storage: Vec<StorageKeyValuePair>,
    /// Contract code. `original` holds the code text as written, which may be
    /// a `file:` reference.
    pub code: JsonBytes,
}

impl Account {
    /// Looks up a storage value by key bytes.
    pub fn storage_value(&self, key: &[u8]) -> Option<&JsonBytes> {
        self.storage
            .iter()
            .find(|pair| pair.key.value == key)
            .map(|pair| &pair.value)
    }
}

/// Expected storage of an account: `*` or the exact set of slots.
pub type CheckStorage = CheckValue<Vec<StorageKeyValuePair>>;

/// Expected state of a single account.
///
/// Fields left out of the document are not checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckAccount {
    /// Account address
    pub address: JsonBytes,
    /// Expected nonce
    pub nonce: CheckValue<JsonBigInt>,
    /// Expected balance
    pub balance: CheckValue<JsonBigInt>,
    /// Expected storage
    pub storage: CheckStorage,
    /// Expected code
    pub code: CheckValue<JsonBytes>,
}

/// Expected state of a set of accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckAccounts {
    /// Whether accounts not listed may exist. Set by a `"+"` key.
    pub other_accounts_allowed: bool,
    /// Accounts in document order.
    pub accounts: Vec<CheckAccount>,
}

impl CheckAccounts {
    /// Finds the check for the account with the given address bytes.
    pub fn get(&self, address: &[u8]) -> Option<&CheckAccount> {
        self.accounts
            .iter()
            .find(|account| account.address.value == address)
    }
}
