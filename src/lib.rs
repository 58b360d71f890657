//! Error Trace
//!
//! Structured errors for operations that can fail in more than one way: instead
//! of a single error value, an operation collects an ordered trace of records.
//!
//! ## Features
//!
//! - **Canonical records**: every error is a `{code, msg, args}` value
//! - **Registry**: stable codes map to default messages, loadable from JSON or YAML
//! - **Flexible construction**: records are built from positional inputs, the
//!   first one picking the code, the rest overriding message and args
//! - **Traces**: ordered collections with a representative record for display
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use error_trace::{inputs, ErrorTrace, Registry, RenderMode, Resolver};
//!
//! let registry = Arc::new(Registry::new());
//! registry.register_code("ERROR_QUOTA", "Quota exceeded");
//!
//! let mut trace = ErrorTrace::with_resolver(Resolver::new(registry));
//! trace.add(inputs!["ERROR_QUOTA"]);
//! trace.add(inputs!["ERROR_RETRY", "retry budget exhausted"]);
//!
//! assert!(trace.has("ERROR_RETRY"));
//! assert_eq!(trace.to_string(), "ERROR_QUOTA");
//!
//! trace.set_render_mode(RenderMode::Msg);
//! assert_eq!(trace.to_string(), "Quota exceeded");
//! ```

pub mod codes;
pub mod config;
pub mod error;
pub mod input;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod trace;

pub use config::TraceConfig;
pub use error::{Result, TraceError};
pub use input::Input;
pub use record::{Args, ErrorRecord, Message};
pub use registry::{Registration, Registry, SearchResult};
pub use resolver::Resolver;
pub use trace::{ErrorTrace, Generator, RenderMode, Representative};
