use super::value::{parse_bytes_list, parse_list, parse_map, parse_string};
use crate::{
    error::WithContext, CheckStateStep, DecodeError, FileResolver, Parser, SetStateStep, Step,
    TransactionType, TxStep, STEP_NAME_CHECK_STATE, STEP_NAME_SC_CALL, STEP_NAME_SC_DEPLOY,
    STEP_NAME_SET_STATE, STEP_NAME_TRANSFER,
};
use serde_json::{Map, Value};
use tracing::debug;

impl<R: FileResolver> Parser<R> {
    pub(super) fn parse_steps(&self, value: &Value) -> Result<Vec<Step>, DecodeError> {
        parse_list(value, "steps")?
            .iter()
            .enumerate()
            .map(|(index, step)| self.parse_step(step).context(format!("step {index}")))
            .collect()
    }

    /// Reads the `step` field first to pick the kind, then decodes every
    /// field against that kind.
    fn parse_step(&self, value: &Value) -> Result<Step, DecodeError> {
        let step_map = parse_map(value, "step object")?;

        let step_type = match step_map.get("step") {
            Some(value) => parse_string(value).context("step type not a string")?,
            None => String::new(),
        };

        let step = match step_type.as_str() {
            "" => return Err(DecodeError::MissingStepType),
            STEP_NAME_SET_STATE => self.parse_set_state_step(step_map).map(Step::SetState),
            STEP_NAME_CHECK_STATE => self.parse_check_state_step(step_map).map(Step::CheckState),
            STEP_NAME_SC_CALL => self
                .parse_tx_step(TransactionType::ScCall, step_map)
                .map(Step::Transaction),
            STEP_NAME_SC_DEPLOY => self
                .parse_tx_step(TransactionType::ScDeploy, step_map)
                .map(Step::Transaction),
            STEP_NAME_TRANSFER => self
                .parse_tx_step(TransactionType::Transfer, step_map)
                .map(Step::Transaction),
            _ => return Err(DecodeError::UnknownStepType(step_type)),
        }
        .context(format!("{step_type} step"))?;

        debug!(step = step.step_name(), comment = ?step.comment(), "decoded step");
        Ok(step)
    }

    fn parse_set_state_step(
        &self,
        step_map: &Map<String, Value>,
    ) -> Result<SetStateStep, DecodeError> {
        let mut step = SetStateStep::default();
        for (key, value) in step_map {
            match key.as_str() {
                "step" => {}
                "comment" => {
                    step.comment = Some(parse_string(value).context("bad set state step comment")?);
                }
                "accounts" => {
                    step.accounts = self
                        .parse_account_map(value)
                        .context("cannot parse set state step")?;
                }
                "newAddresses" => {
                    step.new_address_mocks =
                        Self::parse_new_address_mocks(value).context("error parsing new addresses")?;
                }
                "blockhashes" => {
                    step.block_hashes =
                        parse_bytes_list(value).context("error parsing block hashes")?;
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "set state",
                        key: key.clone(),
                    })
                }
            }
        }
        Ok(step)
    }

    fn parse_check_state_step(
        &self,
        step_map: &Map<String, Value>,
    ) -> Result<CheckStateStep, DecodeError> {
        let mut step = CheckStateStep::default();
        for (key, value) in step_map {
            match key.as_str() {
                "step" => {}
                "comment" => {
                    step.comment =
                        Some(parse_string(value).context("bad check state step comment")?);
                }
                "accounts" => {
                    step.check_accounts = self
                        .parse_check_account_map(value)
                        .context("cannot parse check state step")?;
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "check state",
                        key: key.clone(),
                    })
                }
            }
        }
        Ok(step)
    }

    /// Shared by `scCall`, `scDeploy` and `transfer`; `tx_type` picks the
    /// transaction fields that are allowed.
    fn parse_tx_step(
        &self,
        tx_type: TransactionType,
        step_map: &Map<String, Value>,
    ) -> Result<TxStep, DecodeError> {
        let mut step = TxStep::default();
        let mut tx = None;
        for (key, value) in step_map {
            match key.as_str() {
                "step" => {}
                "txId" => {
                    step.tx_ident = Some(parse_string(value).context("bad tx step id")?);
                }
                "comment" => {
                    step.comment = Some(parse_string(value).context("bad tx step comment")?);
                }
                "tx" => {
                    tx = Some(
                        self.parse_tx(tx_type, value)
                            .context("cannot parse tx step transaction")?,
                    );
                }
                "expect" => {
                    step.expected_result = Some(
                        Self::parse_tx_expected_result(value)
                            .context("cannot parse tx expected result")?,
                    );
                }
                _ => {
                    return Err(DecodeError::UnknownField {
                        object: "tx step",
                        key: key.clone(),
                    })
                }
            }
        }
        step.tx = tx.ok_or(DecodeError::MissingField {
            object: "tx step",
            key: "tx",
        })?;
        Ok(step)
    }
}
