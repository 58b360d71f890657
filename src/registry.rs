//! Error Registry
//!
//! Maps stable codes to default records. A registry is seeded with the built-in
//! codes from [`crate::codes`] and only grows afterwards: registrations overwrite
//! entries per code (last write wins), nothing is ever removed.
//!
//! The registry is meant to be constructed once and shared by reference, either
//! through [`Registry::global`] or an `Arc<Registry>` handed to each
//! [`Resolver`](crate::Resolver). Writers are serialized behind a readers-writer
//! lock, so registration may happen at any point of the process lifetime.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::codes;
use crate::error::{Result, TraceError};
use crate::record::{ErrorRecord, Message};

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// One positional registration argument
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Record(ErrorRecord),
    Records(Vec<ErrorRecord>),
    Pair(Message),
    Pairs(Vec<Message>),
    /// Code to pair mapping, the preferred bulk shape
    Map(HashMap<String, Message>),
    /// Serialized blob, or a bare code
    Text(String),
    /// Unsupported shape, ignored
    Other(serde_json::Value),
}

impl Registration {
    fn into_records(self) -> Vec<ErrorRecord> {
        match self {
            Registration::Record(record) => vec![record],
            Registration::Records(records) => records,
            Registration::Pair(message) => vec![message.into()],
            Registration::Pairs(messages) => messages.into_iter().map(ErrorRecord::from).collect(),
            Registration::Map(map) => map
                .into_iter()
                .map(|(key, mut message)| {
                    if message.code.is_empty() {
                        message.code = key;
                    }
                    ErrorRecord::from(message)
                })
                .collect(),
            Registration::Text(_) | Registration::Other(_) => Vec::new(),
        }
    }
}

impl From<ErrorRecord> for Registration {
    fn from(record: ErrorRecord) -> Self {
        Registration::Record(record)
    }
}

impl From<Vec<ErrorRecord>> for Registration {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Registration::Records(records)
    }
}

impl From<Message> for Registration {
    fn from(message: Message) -> Self {
        Registration::Pair(message)
    }
}

impl From<Vec<Message>> for Registration {
    fn from(messages: Vec<Message>) -> Self {
        Registration::Pairs(messages)
    }
}

impl From<HashMap<String, Message>> for Registration {
    fn from(map: HashMap<String, Message>) -> Self {
        Registration::Map(map)
    }
}

impl From<&str> for Registration {
    fn from(text: &str) -> Self {
        Registration::Text(text.to_string())
    }
}

impl From<String> for Registration {
    fn from(text: String) -> Self {
        Registration::Text(text)
    }
}

impl From<serde_json::Value> for Registration {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Registration::Text(text),
            other => Registration::Other(other),
        }
    }
}

/// A fuzzy search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub code: String,
    pub msg: String,
    pub score: i64,
}

/// Process-wide mapping from code to default record
#[derive(Debug)]
pub struct Registry {
    entries: RwLock<HashMap<String, ErrorRecord>>,
}

impl Registry {
    /// Create a registry holding only the built-in codes
    pub fn new() -> Self {
        let entries = codes::SEED
            .iter()
            .map(|(code, msg)| (code.to_string(), ErrorRecord::new(*code, *msg)))
            .collect();

        Self {
            entries: RwLock::new(entries),
        }
    }

    /// The shared registry, created on first use
    pub fn global() -> Arc<Registry> {
        GLOBAL.get_or_init(|| Arc::new(Registry::new())).clone()
    }

    /// Register error definitions
    ///
    /// The arguments are interpreted positionally:
    /// - a leading [`Registration::Text`] is parsed as a JSON or YAML blob; if it
    ///   is neither, it is registered as a bare code, taking a second `Text`
    ///   argument as its message
    /// - a single argument of any other shape is merged according to its shape
    /// - several arguments: each `Pair` or `Record` is merged on its own, the
    ///   rest is ignored
    ///
    /// Unusable input is dropped silently. Returns the number of entries written.
    pub fn register<I>(&self, registrations: I) -> usize
    where
        I: IntoIterator<Item = Registration>,
    {
        let mut args: Vec<Registration> = registrations.into_iter().collect();

        let records = match args.first() {
            None => return 0,
            Some(Registration::Text(head)) => match Self::parse_blob(head) {
                Ok(records) => records,
                Err(err) => {
                    if head.trim_start().starts_with(['{', '[']) {
                        warn!(error = %err, "text looks like a blob but did not parse, registering it as a bare code");
                    } else {
                        debug!(code = %head, error = %err, "registering text as a bare code");
                    }
                    let msg = match args.get(1) {
                        Some(Registration::Text(msg)) => msg.clone(),
                        _ => String::new(),
                    };
                    vec![ErrorRecord::new(head.clone(), msg)]
                }
            },
            Some(_) if args.len() == 1 => args.remove(0).into_records(),
            Some(_) => args
                .into_iter()
                .filter_map(|arg| match arg {
                    Registration::Pair(message) => Some(ErrorRecord::from(message)),
                    Registration::Record(record) => Some(record),
                    other => {
                        debug!(?other, "ignoring registration argument");
                        None
                    }
                })
                .collect(),
        };

        self.merge(records)
    }

    /// Register a single argument
    pub fn register_one(&self, registration: impl Into<Registration>) -> usize {
        self.register([registration.into()])
    }

    /// Register a code with its default message
    pub fn register_code(&self, code: impl Into<String>, msg: impl Into<String>) -> usize {
        self.merge(vec![ErrorRecord::new(code, msg)])
    }

    /// Read a file and register its contents as a blob
    ///
    /// Unlike [`Registry::register`], content that is not a JSON or YAML
    /// collection is reported instead of being taken for a bare code.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TraceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse_blob(&content)?;
        let count = self.merge(records);
        debug!(path = %path.display(), count, "loaded error definitions");
        Ok(count)
    }

    /// Parse a serialized collection of error definitions
    ///
    /// Tried in order: JSON object of code to pair, JSON array of pairs, YAML
    /// object, YAML array. The first successful parse wins.
    pub fn parse_blob(blob: &str) -> Result<Vec<ErrorRecord>> {
        if let Ok(map) = serde_json::from_str::<HashMap<String, Message>>(blob) {
            return Ok(Registration::Map(map).into_records());
        }
        if let Ok(records) = serde_json::from_str::<Vec<ErrorRecord>>(blob) {
            return Ok(records);
        }
        if let Ok(map) = serde_yaml::from_str::<HashMap<String, Message>>(blob) {
            return Ok(Registration::Map(map).into_records());
        }
        serde_yaml::from_str::<Vec<ErrorRecord>>(blob)
            .map_err(|e| TraceError::UnsupportedBlob(e.to_string()))
    }

    fn merge(&self, records: Vec<ErrorRecord>) -> usize {
        let mut entries = self.entries.write();
        let mut count = 0;
        for record in records {
            if record.code.is_empty() {
                warn!(msg = %record.msg, "skipping error definition without a code");
                continue;
            }
            trace!(code = %record.code, "registering error");
            entries.insert(record.code.clone(), record);
            count += 1;
        }
        count
    }

    /// The registered record for `code`, falling back to the generic record
    pub fn lookup(&self, code: &str) -> ErrorRecord {
        let entries = self.entries.read();
        entries
            .get(code)
            .or_else(|| entries.get(codes::ERROR_GENERIC))
            .cloned()
            .unwrap_or_else(ErrorRecord::generic)
    }

    /// The registered record for `code`, if any
    pub fn get(&self, code: &str) -> Option<ErrorRecord> {
        self.entries.read().get(code).cloned()
    }

    /// The registered `{code, msg}` pair for `code`, if any
    pub fn message(&self, code: &str) -> Option<Message> {
        self.entries.read().get(code).map(ErrorRecord::message)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.read().contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All registered codes, sorted
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.entries.read().keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Search registered errors by code and message (fuzzy)
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        use fuzzy_matcher::skim::SkimMatcherV2;
        use fuzzy_matcher::FuzzyMatcher;

        let matcher = SkimMatcherV2::default();
        let entries = self.entries.read();
        let mut results: Vec<SearchResult> = Vec::new();

        for record in entries.values() {
            let score = [
                matcher.fuzzy_match(&record.code, query),
                matcher.fuzzy_match(&record.msg, query),
            ]
            .into_iter()
            .flatten()
            .max();

            if let Some(score) = score {
                results.push(SearchResult {
                    code: record.code.clone(),
                    msg: record.msg.clone(),
                    score,
                });
            }
        }

        // Sort by score descending, code for stable ties
        results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.code.cmp(&b.code)));
        results.truncate(limit);
        results
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_registry() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 4);
        for (code, msg) in codes::SEED {
            assert_eq!(registry.lookup(code).msg, msg);
        }
    }

    #[test]
    fn test_lookup_falls_back_to_generic() {
        let registry = Registry::new();
        let record = registry.lookup("ERROR_MISSING");
        assert_eq!(record.code, codes::ERROR_GENERIC);
        assert_eq!(record.msg, "An error has occurred");
        assert!(registry.get("ERROR_MISSING").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let registry = Registry::new();
        registry.register_one(Message::new("C", "m1"));
        registry.register_one(Message::new("C", "m2"));
        assert_eq!(registry.lookup("C").msg, "m2");
    }

    #[test]
    fn test_bare_code_with_message() {
        let registry = Registry::new();
        let count = registry.register([
            Registration::from("ERROR_BARE"),
            Registration::from("bare message"),
        ]);
        assert_eq!(count, 1);
        assert_eq!(registry.lookup("ERROR_BARE").msg, "bare message");
    }

    #[test]
    fn test_bare_code_without_message() {
        let registry = Registry::new();
        registry.register_one("ERROR_BARE");
        let record = registry.get("ERROR_BARE").unwrap();
        assert_eq!(record.msg, "");
    }

    #[test]
    fn test_empty_code_skipped() {
        let registry = Registry::new();
        let count = registry.register_one(Message::new("", "orphan"));
        assert_eq!(count, 0);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_map_key_fills_missing_code() {
        let mut map = HashMap::new();
        map.insert("ERROR_KEYED".to_string(), Message::new("", "keyed"));
        let registry = Registry::new();
        registry.register_one(map);
        assert_eq!(registry.lookup("ERROR_KEYED").msg, "keyed");
    }

    #[test]
    fn test_search_ranks_matches() {
        let registry = Registry::new();
        let results = registry.search("INTERNAL", 10);
        assert_eq!(results[0].code, codes::ERROR_INTERNAL);
        assert!(registry.search("INTERNAL", 0).is_empty());
    }
}
