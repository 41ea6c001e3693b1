use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while parsing a single value literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Text is not a decimal or `0x` hex integer.
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),
    /// Text matches none of the byte-sequence literal forms.
    #[error("invalid byte sequence {0:?}")]
    InvalidBytes(String),
    /// Text after `0x` is not valid hex.
    #[error("invalid hex {text:?}: {reason}")]
    InvalidHex {
        /// Offending text.
        text: String,
        /// Hex decoder message.
        reason: String,
    },
    /// A negative number where only non-negative ones are accepted.
    #[error("negative value not allowed: {0:?}")]
    Negative(String),
    /// Number does not fit in 64 bits.
    #[error("value does not fit in u64: {0:?}")]
    U64Overflow(String),
    /// `file:` reference used where files are not resolved.
    #[error("file reference not allowed here: {0:?}")]
    FileNotAllowed(String),
}

/// Errors that can occur while decoding a scenario document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input bytes are not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Expected a JSON map.
    #[error("{0} is not a map")]
    NotAMap(&'static str),
    /// Expected a JSON list.
    #[error("{0} is not a list")]
    NotAList(&'static str),
    /// Value of the wrong node kind.
    #[error("expected {expected}, found {found}")]
    WrongType {
        /// Expected node kind.
        expected: &'static str,
        /// Node kind that was found.
        found: &'static str,
    },
    /// Key not recognised in the object being decoded.
    #[error("unknown {object} field: {key}")]
    UnknownField {
        /// Object kind, e.g. `scenario` or `set state`.
        object: &'static str,
        /// Offending key.
        key: String,
    },
    /// Required key not present.
    #[error("missing {object} field: {key}")]
    MissingField {
        /// Object kind.
        object: &'static str,
        /// Missing key.
        key: &'static str,
    },
    /// Step map without a `step` key.
    #[error("no step type field provided")]
    MissingStepType,
    /// `step` value is not a known kind.
    #[error("unknown step type: {0}")]
    UnknownStepType(String),
    /// Malformed value literal.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// Referenced file could not be read.
    #[error("cannot read file {path:?}: {source}")]
    File {
        /// Resolved path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Error with the key or step it occurred in.
    #[error("{context}: {source}")]
    Context {
        /// Where the error happened.
        context: String,
        /// Underlying error.
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Returns the innermost error, skipping all context layers.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attaches a context message to a [`DecodeError`].
pub(crate) trait WithContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T, DecodeError>;
}

impl<T, E: Into<DecodeError>> WithContext<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, DecodeError> {
        self.map_err(|e| DecodeError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }
}

/// Error returned by [`ScenarioRunner`](crate::ScenarioRunner).
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// Scenario file could not be read.
    #[error("cannot read {path:?}: {source}")]
    Io {
        /// Scenario file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Scenario file could not be decoded.
    #[error("cannot decode {path:?}: {source}")]
    Decode {
        /// Scenario file.
        path: PathBuf,
        /// Decode error.
        #[source]
        source: DecodeError,
    },
    /// Executor reported a failure.
    #[error("scenario {path:?} failed: {source}")]
    Execution {
        /// Scenario file.
        path: PathBuf,
        /// Executor error.
        #[source]
        source: E,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_chains_messages() {
        let err: Result<(), DecodeError> = Err(DecodeError::UnknownStepType("sleep".into()));
        let err = err.context("step 0").unwrap_err();
        assert_eq!(err.to_string(), "step 0: unknown step type: sleep");
    }

    #[test]
    fn test_root_cause() {
        let inner: Result<(), ValueError> = Err(ValueError::InvalidInteger("x".into()));
        let err = inner
            .context("nonce")
            .context("account 0x01")
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DecodeError::Value(ValueError::InvalidInteger(text)) if text == "x"
        ));
    }
}
