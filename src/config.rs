//! Configuration management
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (error-trace.toml)
//! - Environment variables (ERROR_TRACE__*)
//!
//! ## Example config file (error-trace.toml):
//! ```toml
//! [trace]
//! representative = "LAST"
//! render = "MSG"
//!
//! [registry]
//! files = ["errors/common.yaml", "errors/billing.json"]
//! strict = false
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::error::Result;
use crate::registry::Registry;
use crate::resolver::Resolver;
use crate::trace::{ErrorTrace, RenderMode, Representative};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Trace defaults
    #[serde(default)]
    pub trace: TraceSettings,

    /// Registry sources
    #[serde(default)]
    pub registry: RegistrySettings,
}

/// Defaults applied to new traces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSettings {
    /// Record standing for the trace (FIRST or LAST)
    #[serde(default)]
    pub representative: Representative,

    /// Field rendered when the trace is displayed (CODE or MSG)
    #[serde(default)]
    pub render: RenderMode,
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// JSON or YAML files with error definitions, registered in order
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Fail on a file that cannot be loaded instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

impl TraceConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "error-trace.toml",
            ".error-trace.toml",
            "config/error-trace.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "error-trace") {
            let xdg_config = config_dir.config_dir().join("error-trace.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ERROR_TRACE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Register the configured files
    ///
    /// Returns the number of entries written. Unloadable files are skipped with a
    /// warning unless `registry.strict` is set.
    pub fn apply(&self, registry: &Registry) -> Result<usize> {
        let mut total = 0;
        for path in &self.registry.files {
            match registry.load_file(path) {
                Ok(count) => total += count,
                Err(err) if !self.registry.strict => {
                    warn!(path = %path.display(), error = %err, "skipping error definitions");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(total)
    }

    /// Empty trace carrying the configured defaults
    pub fn new_trace(&self, resolver: Resolver) -> ErrorTrace {
        ErrorTrace::with_resolver(resolver)
            .with_policy(self.trace.representative)
            .with_render_mode(self.trace.render)
    }
}
