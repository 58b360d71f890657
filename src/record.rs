//! Error record types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::codes;

/// Contextual arguments attached to a record
pub type Args = HashMap<String, serde_json::Value>;

/// A single error occurrence
///
/// Serializes as `{"code": .., "msg": .., "args": {..}}` with all three fields
/// always present. Records are plain values: cloning one yields an independent
/// copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Stable identifier of the error category
    #[serde(default)]
    pub code: String,
    /// Display text
    #[serde(default)]
    pub msg: String,
    /// Contextual arguments
    #[serde(default)]
    pub args: Args,
}

impl ErrorRecord {
    /// Create a record with empty args
    pub fn new(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            msg: msg.into(),
            args: Args::new(),
        }
    }

    /// The built-in generic record
    pub fn generic() -> Self {
        Self::new(
            codes::ERROR_GENERIC,
            codes::seed_message(codes::ERROR_GENERIC).unwrap_or_default(),
        )
    }

    /// Replace the args
    pub fn with_args(mut self, args: Args) -> Self {
        self.args = args;
        self
    }

    /// Insert a single argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Look up one argument
    pub fn arg(&self, key: &str) -> Option<&serde_json::Value> {
        self.args.get(key)
    }

    /// The `{code, msg}` part of this record
    pub fn message(&self) -> Message {
        Message::new(self.code.clone(), self.msg.clone())
    }

    /// JSON wire representation
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "msg": self.msg,
            "args": self.args,
        })
    }
}

impl Default for ErrorRecord {
    fn default() -> Self {
        Self::generic()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for ErrorRecord {}

impl From<Message> for ErrorRecord {
    fn from(message: Message) -> Self {
        Self::new(message.code, message.msg)
    }
}

/// Minimal `{code, msg}` pair, the unit of registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub msg: String,
}

impl Message {
    pub fn new(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            msg: msg.into(),
        }
    }
}

impl From<ErrorRecord> for Message {
    fn from(record: ErrorRecord) -> Self {
        Self {
            code: record.code,
            msg: record.msg,
        }
    }
}

impl From<&ErrorRecord> for Message {
    fn from(record: &ErrorRecord) -> Self {
        record.message()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_generic() {
        let record = ErrorRecord::default();
        assert_eq!(record.code, codes::ERROR_GENERIC);
        assert_eq!(record.msg, "An error has occurred");
        assert!(record.args.is_empty());
    }

    #[test]
    fn test_wire_shape_has_all_fields() {
        let record = ErrorRecord::new("ERROR_X", "");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"code": "ERROR_X", "msg": "", "args": {}}));
        assert_eq!(record.to_value(), value);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let record: ErrorRecord = serde_json::from_str(r#"{"code": "ERROR_X"}"#).unwrap();
        assert_eq!(record.code, "ERROR_X");
        assert_eq!(record.msg, "");
        assert!(record.args.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = ErrorRecord::new("ERROR_X", "m").with_arg("key", "value");
        let mut copy = original.clone();
        copy.msg = "changed".to_string();
        copy.args.insert("other".to_string(), json!(1));

        assert_eq!(original.msg, "m");
        assert_eq!(original.args.len(), 1);
    }

    #[test]
    fn test_display_renders_msg() {
        let record = ErrorRecord::new("ERROR_X", "something broke");
        assert_eq!(record.to_string(), "something broke");
    }
}
