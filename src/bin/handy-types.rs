//! Handy Types CLI
//!
//! Command-line interface for checking JSON values against handy-type schemas.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use handy_types::{
    json_type_name, parse_schema, AssertError, ErrorCode, ErrorInfo, Registry, SchemaCache,
    TypeCategory,
};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "handy-types")]
#[command(about = "Check JSON values against handy-type schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a JSON value against a schema
    Check {
        /// Schema, e.g. "integer | integer[]"
        schema: String,

        /// JSON file holding the value (stdin if not specified or "-")
        value: Option<PathBuf>,

        /// Check each element of a top-level JSON array separately
        #[arg(long)]
        each: bool,

        /// Name of the value in the error message
        #[arg(long)]
        name: Option<String>,

        /// Replace the generated error message
        #[arg(long)]
        message: Option<String>,

        /// Error code attached to the failure
        #[arg(long)]
        code: Option<String>,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Print the compiled form of a schema
    Parse {
        /// Schema to compile
        schema: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the registered types
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            schema,
            value,
            each,
            name,
            message,
            code,
            json,
        } => run_check(CheckArgs {
            schema,
            value,
            each,
            name,
            message,
            code,
            json_output: json,
        }),
        Commands::Parse { schema, pretty } => run_parse(&schema, pretty),
        Commands::Types { json } => run_types(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct CheckArgs {
    schema: String,
    value: Option<PathBuf>,
    each: bool,
    name: Option<String>,
    message: Option<String>,
    code: Option<String>,
    json_output: bool,
}

fn run_check(args: CheckArgs) -> Result<(), u8> {
    let CheckArgs {
        schema,
        value,
        each,
        name,
        message,
        code,
        json_output,
    } = args;

    let value = load_value(value.as_deref()).map_err(|(msg, code)| {
        report_error(json_output, &msg);
        code
    })?;

    let info = ErrorInfo {
        name,
        message,
        code: code.map(ErrorCode::from),
        other_info: None,
    };

    // Parse once up front so a bad schema fails even when there is nothing
    // to check; the loop below then hits the cache.
    let cache = SchemaCache::new();
    if let Err(err) = cache.get_or_parse(&schema) {
        report_error(json_output, &err.to_string());
        return Err(err.exit_code() as u8);
    }

    let values = match (each, value) {
        (true, Value::Array(items)) => items,
        (true, other) => {
            report_error(
                json_output,
                &format!("--each expects a JSON array, got {}", json_type_name(&other)),
            );
            return Err(2);
        }
        (false, value) => vec![value],
    };

    let mut failures = Vec::new();
    for (index, value) in values.iter().enumerate() {
        match cache.assert(&schema, value, &info) {
            Ok(()) => {}
            Err(AssertError::Invalid(err)) => failures.push((index, json_type_name(value), err)),
            Err(AssertError::Schema(err)) => {
                report_error(json_output, &err.to_string());
                return Err(err.exit_code() as u8);
            }
        }
    }

    if failures.is_empty() {
        if json_output {
            println!(r#"{{"valid":true}}"#);
        } else {
            println!("Valid");
        }
        return Ok(());
    }

    if json_output {
        let errors: Vec<Value> = failures
            .iter()
            .map(|(index, actual, err)| {
                let mut entry = serde_json::to_value(err).unwrap_or(Value::Null);
                if let Value::Object(map) = &mut entry {
                    map.insert("actual".into(), Value::from(*actual));
                    if each {
                        map.insert("index".into(), Value::from(*index));
                    }
                }
                entry
            })
            .collect();
        println!("{}", serde_json::json!({ "valid": false, "errors": errors }));
    } else {
        eprintln!("Validation failed:");
        for (index, actual, err) in &failures {
            if each {
                eprintln!("  [{}] {} (got {})", index, err, actual);
            } else {
                eprintln!("  {} (got {})", err, actual);
            }
        }
    }
    Err(1)
}

fn run_parse(schema: &str, pretty: bool) -> Result<(), u8> {
    let parsed = parse_schema(schema).map_err(|e| {
        eprintln!("Error [{}]: {}", e.code(), e);
        e.exit_code() as u8
    })?;

    let output = if pretty {
        serde_json::to_string_pretty(&parsed)
    } else {
        serde_json::to_string(&parsed)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    println!("{}", output);
    Ok(())
}

fn run_types(json_output: bool) -> Result<(), u8> {
    let registry = Registry::handy();

    if json_output {
        let types: Vec<Value> = registry
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "name": entry.name,
                    "displayName": entry.display_name,
                    "category": entry.category,
                })
            })
            .collect();
        println!("{}", Value::from(types));
        return Ok(());
    }

    for category in TypeCategory::ALL {
        let entries: Vec<_> = registry
            .iter()
            .filter(|e| e.category == *category)
            .collect();
        if entries.is_empty() {
            continue;
        }
        println!("{}:", category);
        for entry in entries {
            println!("  {:<24} {}", entry.name, entry.display_name);
        }
    }
    Ok(())
}

/// Read a JSON value from a file, or stdin for `None` / `-`.
///
/// Errors carry the exit code: 3 for IO, 2 for malformed JSON.
fn load_value(path: Option<&Path>) -> Result<Value, (String, u8)> {
    let content = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| (format!("cannot read {}: {}", path.display(), e), 3))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| (format!("cannot read stdin: {}", e), 3))?;
            buf
        }
    };

    serde_json::from_str(&content).map_err(|e| (format!("invalid JSON: {}", e), 2))
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
