//! Record construction
//!
//! Turns a positional list of [`Input`] values into an [`ErrorRecord`]:
//!
//! 1. The head input establishes identity:
//!    - `Text`: becomes the code; a registered code also brings its message
//!    - `Record`: copied wholesale
//!    - `Pair`: sets code and message
//!    - `Error`: sets the message, the code stays as it was
//!    - anything else fails the resolution, see [`Resolver::set`]
//! 2. Every following input overrides one field, last write wins:
//!    `Text` and `Error` replace the message, `Args` replaces the args.
//!    Other shapes are ignored.

use std::error::Error as StdError;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::codes;
use crate::input::{Input, EXPECTED_HEAD};
use crate::record::{Args, ErrorRecord};
use crate::registry::Registry;

/// Builds records, using a registry for default messages
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
}

impl Resolver {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Resolver bound to [`Registry::global`]
    pub fn global() -> Self {
        Self::new(Registry::global())
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Build a record, starting from the generic template
    ///
    /// Always yields a record; unusable inputs produce an
    /// `ERROR_GENERATE_PARAMETER_INVALID` record.
    pub fn construct<I>(&self, inputs: I) -> ErrorRecord
    where
        I: IntoIterator<Item = Input>,
    {
        self.generate(inputs).0
    }

    /// Build a record and report whether the inputs were usable
    pub fn generate<I>(&self, inputs: I) -> (ErrorRecord, bool)
    where
        I: IntoIterator<Item = Input>,
    {
        let mut record = ErrorRecord::generic();
        self.load(&mut record, codes::ERROR_GENERIC);
        let ok = self.set(&mut record, inputs);
        (record, ok)
    }

    /// Apply `inputs` to an existing record
    ///
    /// Returns `false` only when the head input has an unsupported shape. In that
    /// case `record` is replaced by the `ERROR_GENERATE_PARAMETER_INVALID`
    /// template whose args describe the offending input and the remaining ones,
    /// which are not applied.
    ///
    /// A head carrying an empty code leaves the code as it was; a record that
    /// still has no code afterwards gets `ERROR_GENERIC`.
    pub fn set<I>(&self, record: &mut ErrorRecord, inputs: I) -> bool
    where
        I: IntoIterator<Item = Input>,
    {
        let mut inputs = inputs.into_iter();
        let Some(head) = inputs.next() else {
            return true;
        };

        let previous = record.code.clone();

        match head {
            Input::Text(code) => {
                if !self.load(record, &code) {
                    record.code = code;
                }
            }
            Input::Record(source) => *record = source,
            Input::Pair(message) => {
                record.code = message.code;
                record.msg = message.msg;
            }
            Input::Error(text) => record.msg = text,
            unsupported => {
                debug!(kind = unsupported.kind(), "unsupported head input");
                *record = self.parameter_invalid(&unsupported, inputs.map(|i| i.to_value()).collect());
                return false;
            }
        }

        // An empty head code keeps the previous one, or falls back to generic
        if record.code.is_empty() {
            record.code = if previous.is_empty() {
                codes::ERROR_GENERIC.to_string()
            } else {
                previous
            };
        }

        for input in inputs {
            match input {
                Input::Text(msg) | Input::Error(msg) => record.msg = msg,
                Input::Args(args) => record.args = args,
                ignored => trace!(kind = ignored.kind(), "ignoring tail input"),
            }
        }

        true
    }

    /// Copy code and message of a registered code into `record`
    ///
    /// Args are left alone. Returns `false`, leaving `record` untouched, when the
    /// code is not registered.
    pub fn load(&self, record: &mut ErrorRecord, code: &str) -> bool {
        match self.registry.message(code) {
            Some(message) => {
                record.code = message.code;
                record.msg = message.msg;
                true
            }
            None => false,
        }
    }

    /// Registered record for `code`, or the generic one
    pub fn lookup(&self, code: &str) -> ErrorRecord {
        self.registry.lookup(code)
    }

    /// Record for a code, with the registered message when there is one
    pub fn code(&self, code: impl Into<String>) -> ErrorRecord {
        self.construct([Input::Text(code.into())])
    }

    /// Record for a code with an explicit message
    pub fn code_with_message(&self, code: impl Into<String>, msg: impl Into<String>) -> ErrorRecord {
        self.construct([Input::Text(code.into()), Input::Text(msg.into())])
    }

    /// Record for a code with an explicit message and args
    pub fn full(
        &self,
        code: impl Into<String>,
        msg: impl Into<String>,
        args: Args,
    ) -> ErrorRecord {
        self.construct([
            Input::Text(code.into()),
            Input::Text(msg.into()),
            Input::Args(args),
        ])
    }

    /// Generic record carrying the text of `error`
    pub fn from_error(&self, error: &dyn StdError) -> ErrorRecord {
        self.construct([Input::from_error(error)])
    }

    fn parameter_invalid(&self, head: &Input, rest: Vec<Value>) -> ErrorRecord {
        let template = self.registry.lookup(codes::ERROR_GENERATE_PARAMETER_INVALID);
        let mut args = Args::new();
        args.insert("error_item".to_string(), head.to_value());
        args.insert("args".to_string(), Value::Array(rest));
        args.insert("expected_type".to_string(), Value::from(EXPECTED_HEAD));

        ErrorRecord::new(template.code, template.msg).with_args(args)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::global()
    }
}
