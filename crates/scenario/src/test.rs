use crate::{Account, JsonBigInt, JsonBytes, JsonU64, Transaction, TransactionResult};

/// Block-oriented test fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Test {
    /// Key of the test in a multi-test document.
    pub test_name: String,
    /// Whether gas values are asserted.
    pub check_gas: bool,
    /// Accounts before the first block.
    pub pre: Vec<Account>,
    /// Blocks in execution order.
    pub blocks: Vec<Block>,
    /// Network tag.
    pub network: String,
    /// Historical block hashes.
    pub block_hashes: Vec<JsonBytes>,
    /// Accounts after the last block.
    pub post_state: Vec<Account>,
}

impl Default for Test {
    fn default() -> Self {
        Self {
            test_name: String::new(),
            check_gas: crate::DEFAULT_CHECK_GAS,
            pre: Vec::new(),
            blocks: Vec::new(),
            network: String::new(),
            block_hashes: Vec::new(),
            post_state: Vec::new(),
        }
    }
}

/// Block with its transactions and their results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// One result per transaction.
    pub results: Vec<TransactionResult>,
    /// Transactions in execution order.
    pub transactions: Vec<Transaction>,
    /// Block header.
    pub block_header: BlockHeader,
}

/// Block header structure
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockHeader {
    /// Gas limit for this block
    pub gas_limit: JsonBigInt,
    /// Block number
    pub number: JsonBigInt,
    /// Block difficulty
    pub difficulty: JsonBigInt,
    /// Block timestamp
    pub timestamp: JsonU64,
    /// Block coinbase/beneficiary address
    pub beneficiary: JsonBigInt,
}
