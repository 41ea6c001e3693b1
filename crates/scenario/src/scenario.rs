use crate::Step;

/// Whether gas is checked when a document does not say.
pub const DEFAULT_CHECK_GAS: bool = true;

/// Step-sequence test fixture.
///
/// Steps are run in order; their position in the document is the only
/// ordering there is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Scenario name.
    pub name: Option<String>,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Whether gas values are asserted.
    pub check_gas: bool,
    /// Steps in document order.
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: None,
            comment: None,
            check_gas: DEFAULT_CHECK_GAS,
            steps: Vec::new(),
        }
    }
}
