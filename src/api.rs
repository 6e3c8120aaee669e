use crate::error::EdnError;
use crate::reader::Reader;
use crate::serialization::to_serializable;
use crate::utils;
use crate::value::Value;
use log::debug;

/// Parses one EDN source string into the single top-level value encoded at
/// its start.
///
/// This is the primary entry point. An empty buffer (or one holding only
/// whitespace and comments) is not an error: it yields `Ok(None)`, and
/// callers must treat it as "no value".
///
/// # Errors
///
/// Returns an `EdnError` when the input is not valid notation. The whole
/// parse fails at the first structural problem; there is no partial-result
/// recovery. Callers processing a batch of independently produced inputs
/// should isolate failures per input.
pub fn parse(source: &str) -> Result<Option<Value>, EdnError> {
    parse_with_name(source, "input.edn")
}

/// Like [`parse`], with a name attached to the source for error reporting.
///
/// # Errors
///
/// Returns an `EdnError` when the input is not valid notation.
pub fn parse_with_name(source: &str, name: &str) -> Result<Option<Value>, EdnError> {
    let mut reader = Reader::new_with_name(source, name.to_string());
    loop {
        let before = reader.offset();
        match reader.read_any() {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {
                // A consumed comment advances the cursor; keep looking. No
                // progress means end of input or a stray top-level closer.
                if reader.at_end() || reader.offset() == before {
                    return Ok(None);
                }
            }
            Err(err) => {
                let (line, column) = utils::line_and_column(source, err.offset());
                debug!("failed to read {name} at {line}:{column}");
                return Err(err);
            }
        }
    }
}

/// Serializes a parsed value into a pretty-printed JSON string.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_serializable(value))
}

/// Serializes a parsed value into a YAML string.
///
/// # Errors
///
/// Returns a `serde_yaml::Error` if serialization fails.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&to_serializable(value))
}
