//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! tabserve serve --config tabserve.yaml
//! tabserve serve --address 0.0.0.0:8000 --cache-capacity 0
//! tabserve metadata model.json
//! tabserve schema model.json --data sample.csv
//! tabserve predict model.json --record '{"age": 30, "income": 50000}'
//! ```

use super::ServiceConfig;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// tabserve: serve trained tabular models
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "tabserve")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Serve trained tabular models: metadata, input schemas and predictions")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format for command results (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Print a model's metadata
    Metadata(MetadataArgs),

    /// Build the input schema for a model
    Schema(SchemaArgs),

    /// Predict a single record
    Predict(PredictArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// Path to YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override listen address
    #[arg(short, long)]
    pub address: Option<SocketAddr>,

    /// Override model cache capacity (0 disables caching)
    #[arg(long)]
    pub cache_capacity: Option<usize>,
}

/// Arguments for the metadata command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct MetadataArgs {
    /// Path to model artifact (.json, .yaml, .yml)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Arguments for the schema command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SchemaArgs {
    /// Path to model artifact (.json, .yaml, .yml)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Sample table (.json, .csv) used to classify columns
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path to YAML configuration file (inference settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// Path to model artifact (.json, .yaml, .yml)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Record as an inline JSON object
    #[arg(short, long, conflicts_with = "record_file", required_unless_present = "record_file")]
    pub record: Option<String>,

    /// File containing the record as a JSON object
    #[arg(long)]
    pub record_file: Option<PathBuf>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Pretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: json, pretty"
            )),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a ServiceConfig
pub fn apply_overrides(config: &mut ServiceConfig, args: &ServeArgs) {
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(capacity) = args.cache_capacity {
        config.cache.capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = parse_args(["tabserve", "serve"]).unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert!(args.config.is_none());
                assert!(args.address.is_none());
                assert!(args.cache_capacity.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = parse_args([
            "tabserve",
            "serve",
            "--config",
            "tabserve.yaml",
            "--address",
            "0.0.0.0:9000",
            "--cache-capacity",
            "0",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.config, Some(PathBuf::from("tabserve.yaml")));
                assert_eq!(args.address, Some("0.0.0.0:9000".parse().unwrap()));
                assert_eq!(args.cache_capacity, Some(0));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_invalid_address() {
        assert!(parse_args(["tabserve", "serve", "--address", "nowhere"]).is_err());
    }

    #[test]
    fn test_parse_metadata() {
        let cli = parse_args(["tabserve", "metadata", "model.json", "--format", "json"]).unwrap();
        match cli.command {
            Command::Metadata(args) => assert_eq!(args.model, PathBuf::from("model.json")),
            _ => panic!("Expected Metadata command"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_schema_with_data() {
        let cli = parse_args(["tabserve", "schema", "model.yaml", "--data", "sample.csv"]).unwrap();
        match cli.command {
            Command::Schema(args) => {
                assert_eq!(args.data, Some(PathBuf::from("sample.csv")));
                assert!(args.config.is_none());
            }
            _ => panic!("Expected Schema command"),
        }
    }

    #[test]
    fn test_parse_predict_record() {
        let cli = parse_args(["tabserve", "predict", "model.json", "--record", r#"{"a": 1}"#])
            .unwrap();
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.record.as_deref(), Some(r#"{"a": 1}"#));
                assert!(args.record_file.is_none());
            }
            _ => panic!("Expected Predict command"),
        }
    }

    #[test]
    fn test_parse_predict_requires_record() {
        assert!(parse_args(["tabserve", "predict", "model.json"]).is_err());
        assert!(parse_args([
            "tabserve",
            "predict",
            "model.json",
            "--record",
            "{}",
            "--record-file",
            "r.json"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["tabserve", "metadata", "m.json", "-v"]).unwrap();
        assert!(cli.verbose);
        let cli = parse_args(["tabserve", "-q", "metadata", "m.json"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ServiceConfig::default();
        let args = ServeArgs {
            config: None,
            address: Some("0.0.0.0:1234".parse().unwrap()),
            cache_capacity: Some(3),
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.server.address.port(), 1234);
        assert_eq!(config.cache.capacity, 3);
    }
}
