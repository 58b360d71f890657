//! Construction inputs
//!
//! Records are built from a positional list of [`Input`] values. The first input
//! establishes the record's identity, the remaining ones override its message or
//! args. Every supported shape is a variant here, so the resolver matches over a
//! closed set instead of inspecting types at runtime.
//!
//! ```
//! use error_trace::{inputs, Args, Input};
//!
//! let mut args = Args::new();
//! args.insert("key".into(), "value".into());
//! let list: Vec<Input> = inputs!["ERROR_CUSTOM", "custom msg", args];
//! assert_eq!(list.len(), 3);
//! ```

use std::error::Error as StdError;

use crate::record::{Args, ErrorRecord, Message};

/// Description of the shapes accepted in head position
pub const EXPECTED_HEAD: &str = "text | error | record | pair";

/// One positional construction input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Code in head position, message in tail position
    Text(String),
    /// A complete record; copied wholesale in head position
    Record(ErrorRecord),
    /// A `{code, msg}` pair; sets code and msg in head position
    Pair(Message),
    /// Rendered text of a native error
    Error(String),
    /// Replacement args
    Args(Args),
    /// A sequence of records, appended verbatim by [`ErrorTrace::add`](crate::ErrorTrace::add)
    List(Vec<ErrorRecord>),
    /// Any other value
    Value(serde_json::Value),
}

impl Input {
    /// Capture the rendered text of an error
    pub fn from_error(error: &dyn StdError) -> Self {
        Input::Error(error.to_string())
    }

    /// Short name of the shape, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Text(_) => "text",
            Input::Record(_) => "record",
            Input::Pair(_) => "pair",
            Input::Error(_) => "error",
            Input::Args(_) => "args",
            Input::List(_) => "list",
            Input::Value(_) => "value",
        }
    }

    /// JSON rendering, used when reporting unusable inputs
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Input::Text(text) | Input::Error(text) => serde_json::Value::String(text.clone()),
            Input::Record(record) => record.to_value(),
            Input::Pair(message) => serde_json::json!({
                "code": message.code,
                "msg": message.msg,
            }),
            Input::Args(args) => serde_json::Value::Object(
                args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ),
            Input::List(records) => {
                serde_json::Value::Array(records.iter().map(ErrorRecord::to_value).collect())
            }
            Input::Value(value) => value.clone(),
        }
    }
}

/// Build a `Vec<Input>` from heterogeneous values
#[macro_export]
macro_rules! inputs {
    () => {
        ::std::vec::Vec::<$crate::Input>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Input::from($arg)),+]
    };
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Input::Text(text.clone())
    }
}

impl From<ErrorRecord> for Input {
    fn from(record: ErrorRecord) -> Self {
        Input::Record(record)
    }
}

impl From<&ErrorRecord> for Input {
    fn from(record: &ErrorRecord) -> Self {
        Input::Record(record.clone())
    }
}

impl From<Message> for Input {
    fn from(message: Message) -> Self {
        Input::Pair(message)
    }
}

impl From<Args> for Input {
    fn from(args: Args) -> Self {
        Input::Args(args)
    }
}

impl From<Vec<ErrorRecord>> for Input {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Input::List(records)
    }
}

impl From<&[ErrorRecord]> for Input {
    fn from(records: &[ErrorRecord]) -> Self {
        Input::List(records.to_vec())
    }
}

impl From<&Vec<ErrorRecord>> for Input {
    fn from(records: &Vec<ErrorRecord>) -> Self {
        Input::List(records.clone())
    }
}

impl From<std::io::Error> for Input {
    fn from(error: std::io::Error) -> Self {
        Input::Error(error.to_string())
    }
}

impl From<Box<dyn StdError>> for Input {
    fn from(error: Box<dyn StdError>) -> Self {
        Input::Error(error.to_string())
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Input {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        Input::Error(error.to_string())
    }
}

/// JSON strings become [`Input::Text`] and JSON objects become [`Input::Args`];
/// everything else stays an opaque [`Input::Value`].
impl From<serde_json::Value> for Input {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Input::Text(text),
            serde_json::Value::Object(map) => Input::Args(map.into_iter().collect()),
            other => Input::Value(other),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Input::Value(serde_json::Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(i32, i64, u32, u64, usize, f64, bool);
