use crate::{JsonBigInt, JsonBytes, JsonU64};
use core::fmt;

/// Kind of a transaction step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Contract deployment.
    ScDeploy,
    /// Contract call.
    #[default]
    ScCall,
    /// Plain value transfer.
    Transfer,
}

impl TransactionType {
    /// Step name used in scenario documents.
    pub fn step_name(self) -> &'static str {
        match self {
            Self::ScDeploy => "scDeploy",
            Self::ScCall => "scCall",
            Self::Transfer => "transfer",
        }
    }

    /// Returns `true` if the transaction needs a recipient.
    pub fn has_receiver(self) -> bool {
        !matches!(self, Self::ScDeploy)
    }

    /// Returns `true` if the transaction runs contract code.
    pub fn is_smart_contract_tx(self) -> bool {
        !matches!(self, Self::Transfer)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.step_name())
    }
}

/// Transaction executed against the VM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Deploy, call or transfer.
    pub tx_type: TransactionType,
    /// Sender nonce.
    pub nonce: JsonU64,
    /// Sender address.
    pub from: JsonBytes,
    /// Recipient address. Empty for deployments.
    pub to: JsonBytes,
    /// Value transferred.
    pub value: JsonBigInt,
    /// Called function. Empty for deployments and transfers.
    pub function: String,
    /// Call or constructor arguments.
    pub arguments: Vec<JsonBytes>,
    /// Contract code for deployments.
    pub code: JsonBytes,
    /// Gas limit.
    pub gas_limit: JsonU64,
    /// Gas price.
    pub gas_price: JsonU64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type() {
        assert_eq!(TransactionType::ScDeploy.to_string(), "scDeploy");
        assert_eq!(TransactionType::ScCall.step_name(), "scCall");
        assert_eq!(TransactionType::Transfer.step_name(), "transfer");

        assert!(!TransactionType::ScDeploy.has_receiver());
        assert!(TransactionType::Transfer.has_receiver());
        assert!(!TransactionType::Transfer.is_smart_contract_tx());
    }
}
