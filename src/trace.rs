//! Error traces
//!
//! An [`ErrorTrace`] collects the records produced while serving one operation,
//! in the order they happened. One of them, the first or the last depending on
//! [`Representative`], stands for the whole trace when a single record or a
//! single string is needed.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::input::Input;
use crate::record::ErrorRecord;
use crate::resolver::Resolver;

/// Builds one record from raw inputs
pub type Generator = Arc<dyn Fn(Vec<Input>) -> ErrorRecord + Send + Sync>;

/// Which record represents the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Representative {
    #[default]
    First,
    Last,
}

impl Representative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Representative::First => "FIRST",
            Representative::Last => "LAST",
        }
    }
}

impl FromStr for Representative {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST" => Ok(Representative::First),
            "LAST" => Ok(Representative::Last),
            other => Err(format!("unknown representative '{}', expected FIRST or LAST", other)),
        }
    }
}

impl fmt::Display for Representative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which field of the representative record a trace renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RenderMode {
    #[default]
    Code,
    Msg,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Code => "CODE",
            RenderMode::Msg => "MSG",
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CODE" => Ok(RenderMode::Code),
            "MSG" => Ok(RenderMode::Msg),
            other => Err(format!("unknown render mode '{}', expected CODE or MSG", other)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, append-only list of error records
///
/// Appending copies records in: a record taken from another trace is a snapshot,
/// later changes to either copy stay local.
///
/// ```
/// use error_trace::{inputs, ErrorTrace, Representative};
///
/// let mut trace = ErrorTrace::new();
/// trace.add(inputs!["ERROR_1"]);
/// trace.add(inputs!["ERROR_2", "second failure"]);
///
/// assert_eq!(trace.to_string(), "ERROR_1");
/// trace.set_policy(Representative::Last);
/// assert_eq!(trace.get().map(|r| r.msg.as_str()), Some("second failure"));
/// ```
#[derive(Clone, Serialize)]
pub struct ErrorTrace {
    #[serde(rename = "errors")]
    records: Vec<ErrorRecord>,
    #[serde(skip)]
    policy: Representative,
    #[serde(skip)]
    render_mode: RenderMode,
    #[serde(skip)]
    generator: Generator,
}

impl ErrorTrace {
    /// Empty trace resolving records against the global registry
    pub fn new() -> Self {
        Self::with_resolver(Resolver::global())
    }

    /// Empty trace resolving records with `resolver`
    pub fn with_resolver(resolver: Resolver) -> Self {
        Self::with_generator(move |inputs| resolver.construct(inputs))
    }

    /// Empty trace building records with a custom generator
    pub fn with_generator<F>(generator: F) -> Self
    where
        F: Fn(Vec<Input>) -> ErrorRecord + Send + Sync + 'static,
    {
        Self {
            records: Vec::new(),
            policy: Representative::default(),
            render_mode: RenderMode::default(),
            generator: Arc::new(generator),
        }
    }

    /// Trace holding the record built from `inputs`, see [`ErrorTrace::add`]
    pub fn from_inputs<I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = Input>,
    {
        let mut trace = Self::new();
        trace.add(inputs);
        trace
    }

    pub fn with_policy(mut self, policy: Representative) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Append to the trace
    ///
    /// A leading [`Input::List`] is appended verbatim and in order, the remaining
    /// inputs are ignored. Otherwise all inputs go to the generator and the
    /// resulting record is appended. No inputs, no record.
    pub fn add<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Input>,
    {
        let mut inputs: Vec<Input> = inputs.into_iter().collect();
        match inputs.first() {
            None => {}
            Some(Input::List(_)) => {
                if let Input::List(records) = inputs.swap_remove(0) {
                    self.records.extend(records);
                }
            }
            Some(_) => {
                let record = (self.generator)(inputs);
                self.records.push(record);
            }
        }
    }

    /// Append an already built record
    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    /// Append copies of all records of `other`
    pub fn extend_from(&mut self, other: &ErrorTrace) {
        self.records.extend_from_slice(&other.records);
    }

    /// The representative record, `None` when empty
    pub fn get(&self) -> Option<&ErrorRecord> {
        match self.policy {
            Representative::First => self.records.first(),
            Representative::Last => self.records.last(),
        }
    }

    /// The record at `index`, `None` when out of range
    pub fn get_at(&self, index: usize) -> Option<&ErrorRecord> {
        self.records.get(index)
    }

    pub fn get_mut_at(&mut self, index: usize) -> Option<&mut ErrorRecord> {
        self.records.get_mut(index)
    }

    pub fn list(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    /// Whether any record carries `code`
    pub fn has(&self, code: &str) -> bool {
        self.records.iter().any(|record| record.code == code)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn policy(&self) -> Representative {
        self.policy
    }

    pub fn set_policy(&mut self, policy: Representative) {
        self.policy = policy;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Code or message of the representative record, empty when there is none
    pub fn render(&self) -> String {
        match (self.get(), self.render_mode) {
            (None, _) => String::new(),
            (Some(record), RenderMode::Code) => record.code.clone(),
            (Some(record), RenderMode::Msg) => record.msg.clone(),
        }
    }
}

impl Default for ErrorTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorTrace")
            .field("records", &self.records)
            .field("policy", &self.policy)
            .field("render_mode", &self.render_mode)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ErrorTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ErrorTrace {}

impl<'a> IntoIterator for &'a ErrorTrace {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ErrorTrace {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
