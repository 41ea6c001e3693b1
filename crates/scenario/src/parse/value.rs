//! Conversions from JSON nodes to values.
use crate::{
    error::WithContext, value::FILE_PREFIX, CheckValue, DecodeError, FileResolver, JsonBigInt,
    JsonBytes, JsonU64, Parser,
};
use serde_json::{Map, Value};

/// Name of the node kind, for error messages.
pub(super) fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

pub(super) fn parse_str(value: &Value) -> Result<&str, DecodeError> {
    value.as_str().ok_or_else(|| DecodeError::WrongType {
        expected: "string",
        found: node_kind(value),
    })
}

pub(super) fn parse_string(value: &Value) -> Result<String, DecodeError> {
    parse_str(value).map(str::to_string)
}

pub(super) fn parse_bool(value: &Value) -> Result<bool, DecodeError> {
    value.as_bool().ok_or_else(|| DecodeError::WrongType {
        expected: "boolean",
        found: node_kind(value),
    })
}

pub(super) fn parse_map<'a>(
    value: &'a Value,
    what: &'static str,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::NotAMap(what))
}

pub(super) fn parse_list<'a>(
    value: &'a Value,
    what: &'static str,
) -> Result<&'a [Value], DecodeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(DecodeError::NotAList(what))
}

pub(super) fn parse_big_int(value: &Value) -> Result<JsonBigInt, DecodeError> {
    Ok(JsonBigInt::parse(parse_str(value)?)?)
}

pub(super) fn parse_u64(value: &Value) -> Result<JsonU64, DecodeError> {
    Ok(JsonU64::parse(parse_str(value)?)?)
}

pub(super) fn parse_bytes(value: &Value) -> Result<JsonBytes, DecodeError> {
    Ok(JsonBytes::parse(parse_str(value)?)?)
}

pub(super) fn parse_bytes_list(value: &Value) -> Result<Vec<JsonBytes>, DecodeError> {
    parse_list(value, "byte array list")?
        .iter()
        .enumerate()
        .map(|(index, item)| parse_bytes(item).context(format!("item {index}")))
        .collect()
}

fn is_star(value: &Value) -> bool {
    value.as_str() == Some(CheckValue::<()>::STAR)
}

/// Parses `"*"` or the value parsed by `parse`.
pub(super) fn parse_checkable<T>(
    value: &Value,
    parse: impl FnOnce(&Value) -> Result<T, DecodeError>,
) -> Result<CheckValue<T>, DecodeError> {
    if is_star(value) {
        Ok(CheckValue::Star)
    } else {
        parse(value).map(CheckValue::Equal)
    }
}

impl<R: FileResolver> Parser<R> {
    /// Parses contract code, reading `file:` references through the resolver.
    pub(super) fn parse_code(&self, value: &Value) -> Result<JsonBytes, DecodeError> {
        let text = parse_str(value)?;
        if !text.starts_with(FILE_PREFIX) {
            return Ok(JsonBytes::parse(text)?);
        }
        let code = self
            .file_resolver
            .resolve_file_value(text)
            .map_err(|source| DecodeError::File {
                path: self.file_resolver.resolve_absolute_path(text),
                source,
            })?;
        Ok(JsonBytes::with_original(code, text))
    }
}
