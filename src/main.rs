//! tabserve CLI
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP server
//! tabserve serve --config tabserve.yaml
//!
//! # Inspect a model
//! tabserve metadata model.json
//!
//! # Build an input schema from sample data
//! tabserve schema model.json --data sample.csv
//!
//! # Predict one record
//! tabserve predict model.json --record '{"age": 30, "income": 50000}'
//! ```

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabserve::config::{
    apply_overrides, load_config, Cli, Command, MetadataArgs, OutputFormat, PredictArgs,
    SchemaArgs, ServeArgs, ServiceConfig,
};
use tabserve::model::ModelAdapter;
use tabserve::predict::parse_record;
use tabserve::server::ModelServer;
use tabserve::service;
use tabserve::table::load_table;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;
    let result = match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Metadata(args) => run_metadata(args, format),
        Command::Schema(args) => run_schema(args, format),
        Command::Predict(args) => run_predict(args, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `-q` and `-v` win over `RUST_LOG`; otherwise `RUST_LOG` or `info`
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_service_config(path: Option<&std::path::Path>) -> Result<ServiceConfig, String> {
    match path {
        Some(path) => load_config(path).map_err(|e| format!("Config error: {e}")),
        None => Ok(ServiceConfig::default()),
    }
}

fn print_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .map_err(|e| format!("Serialization error: {e}"))?;
    println!("{text}");
    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_serve(args: ServeArgs) -> Result<(), String> {
    let mut config = load_service_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime
        .block_on(ModelServer::new(config).run())
        .map_err(|e| format!("Server error: {e}"))
}

fn run_metadata(args: MetadataArgs, format: OutputFormat) -> Result<(), String> {
    let adapter = ModelAdapter::load(&args.model).map_err(|e| format!("Model error: {e}"))?;
    let metadata = service::describe_model(&adapter, &file_name(&args.model))
        .map_err(|e| e.to_string())?;
    print_output(&metadata, format)
}

fn run_schema(args: SchemaArgs, format: OutputFormat) -> Result<(), String> {
    let config = load_service_config(args.config.as_deref())?;
    let adapter = ModelAdapter::load(&args.model).map_err(|e| format!("Model error: {e}"))?;

    let table = args
        .data
        .as_ref()
        .map(load_table)
        .transpose()
        .map_err(|e| format!("Data error: {e}"))?;

    let schema = service::build_schema(&adapter, table.as_ref(), &config.inference)
        .map_err(|e| e.to_string())?;
    print_output(&schema, format)
}

fn run_predict(args: PredictArgs, format: OutputFormat) -> Result<(), String> {
    let adapter = ModelAdapter::load(&args.model).map_err(|e| format!("Model error: {e}"))?;

    let data = match (&args.record, &args.record_file) {
        (Some(record), _) => record.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        (None, None) => return Err("Either --record or --record-file is required".to_string()),
    };

    let record = parse_record(&data).map_err(|e| e.to_string())?;
    let response = service::predict_record(&adapter, &record).map_err(|e| e.to_string())?;
    print_output(&response, format)
}
