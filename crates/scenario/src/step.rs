use crate::{Account, CheckAccounts, JsonBytes, JsonU64, Transaction, TransactionResult};

/// Step name of [`SetStateStep`].
pub const STEP_NAME_SET_STATE: &str = "setState";
/// Step name of [`CheckStateStep`].
pub const STEP_NAME_CHECK_STATE: &str = "checkState";
/// Step name of a contract call.
pub const STEP_NAME_SC_CALL: &str = "scCall";
/// Step name of a contract deployment.
pub const STEP_NAME_SC_DEPLOY: &str = "scDeploy";
/// Step name of a transfer.
pub const STEP_NAME_TRANSFER: &str = "transfer";

/// One unit of scenario execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Installs accounts and chain data.
    SetState(SetStateStep),
    /// Asserts account state.
    CheckState(CheckStateStep),
    /// Executes a transaction.
    Transaction(TxStep),
}

impl Step {
    /// Free-text comment of the step.
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::SetState(step) => step.comment.as_deref(),
            Self::CheckState(step) => step.comment.as_deref(),
            Self::Transaction(step) => step.comment.as_deref(),
        }
    }

    /// Step name as written in the document.
    pub fn step_name(&self) -> &'static str {
        match self {
            Self::SetState(_) => STEP_NAME_SET_STATE,
            Self::CheckState(_) => STEP_NAME_CHECK_STATE,
            Self::Transaction(step) => step.tx.tx_type.step_name(),
        }
    }
}

/// Predicts the address of a contract created by `creator_address` at
/// `creator_nonce`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewAddressMock {
    /// Deployer address.
    pub creator_address: JsonBytes,
    /// Deployer nonce at deployment.
    pub creator_nonce: JsonU64,
    /// Address the new contract gets.
    pub new_address: JsonBytes,
}

/// Installs accounts, address predictions and block hashes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetStateStep {
    /// Free-text comment.
    pub comment: Option<String>,
    /// Accounts in document order.
    pub accounts: Vec<Account>,
    /// Addresses of contracts deployed later on.
    pub new_address_mocks: Vec<NewAddressMock>,
    /// Historical block hashes.
    pub block_hashes: Vec<JsonBytes>,
}

/// Asserts the state of accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckStateStep {
    /// Free-text comment.
    pub comment: Option<String>,
    /// Expected accounts.
    pub check_accounts: CheckAccounts,
}

/// Executes a transaction and optionally checks its outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxStep {
    /// Free-text comment.
    pub comment: Option<String>,
    /// Transaction identifier used in reports.
    pub tx_ident: Option<String>,
    /// Transaction to run.
    pub tx: Transaction,
    /// Expected outcome, if checked.
    pub expected_result: Option<TransactionResult>,
}
