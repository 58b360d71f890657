//! Error Trace CLI
//!
//! Inspects error registries and resolves records from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use error_trace::{Args, Input, Registry, Resolver, TraceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "error-trace")]
#[command(about = "Inspect error registries and resolve error records")]
#[command(version)]
struct Cli {
    /// Config file (merged over the default locations)
    #[arg(short, long)]
    config: Option<String>,

    /// Extra JSON or YAML files with error definitions
    #[arg(short, long)]
    registry: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the registered record for a code
    Lookup {
        code: String,
    },

    /// Build a record the way a trace would
    Resolve {
        /// Error code
        head: String,
        /// Message override
        msg: Option<String>,
        /// Argument as key=value (value parsed as JSON when possible)
        #[arg(short, long = "arg")]
        args: Vec<String>,
    },

    /// List all registered codes
    List,

    /// Fuzzy search codes and messages
    Search {
        query: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Validate error definition files
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = TraceConfig::load_from(cli.config.as_deref())?;
    let registry = Arc::new(Registry::new());
    config.apply(&registry)?;
    for path in &cli.registry {
        registry.load_file(path)?;
    }

    match cli.command {
        Commands::Lookup { code } => {
            match registry.get(&code) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => {
                    println!("❌ {} is not registered", code);
                    let suggestions = registry.search(&code, 3);
                    if !suggestions.is_empty() {
                        println!("💡 Did you mean:");
                        for hit in suggestions {
                            println!("  {} - {}", hit.code, hit.msg);
                        }
                    }
                    std::process::exit(1);
                }
            }
            Ok(())
        }

        Commands::Resolve { head, msg, args } => {
            let mut inputs = vec![Input::Text(head)];
            if let Some(msg) = msg {
                inputs.push(Input::Text(msg));
            }
            if !args.is_empty() {
                inputs.push(Input::Args(parse_args(&args)?));
            }

            let resolver = Resolver::new(registry);
            let record = resolver.construct(inputs);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }

        Commands::List => {
            let codes = registry.codes();
            println!("📋 {} registered errors", codes.len());
            for code in codes {
                let record = registry.lookup(&code);
                println!("  {} - {}", record.code, record.msg);
            }
            Ok(())
        }

        Commands::Search { query, limit } => {
            let results = registry.search(&query, limit);
            if results.is_empty() {
                println!("No matches for '{}'", query);
            }
            for hit in results {
                println!("  [{:>4}] {} - {}", hit.score, hit.code, hit.msg);
            }
            Ok(())
        }

        Commands::Check { files } => {
            let mut all_valid = true;
            for path in &files {
                let checked = std::fs::read_to_string(path)
                    .map_err(|e| e.to_string())
                    .and_then(|content| Registry::parse_blob(&content).map_err(|e| e.to_string()));
                match checked {
                    Ok(records) => println!("  ✅ {} - {} definitions", path.display(), records.len()),
                    Err(e) => {
                        println!("  ❌ {} - {}", path.display(), e);
                        all_valid = false;
                    }
                }
            }

            if !all_valid {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn parse_args(pairs: &[String]) -> Result<Args, String> {
    let mut args = Args::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid argument '{}', expected key=value", pair))?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        args.insert(key.to_string(), value);
    }
    Ok(args)
}
