//! Property inspection CLI
//!
//! Reads a saved BaseSpace property response and shows what a client sees:
//! each property's type, value, truncation state and, for truncated lists,
//! the absolute URL the remaining items can be paged from.
//!
//! Usage:
//!   cargo run --features cli --bin bs-properties -- response.json
//!
//! Examples:
//!   # Narrow one property to its typed form
//!   cargo run --features cli --bin bs-properties -- response.json \
//!     --name Input.Samples \
//!     --as 'sample[]'
//!
//!   # Read from stdin, JSON output
//!   cat response.json | cargo run --features cli --bin bs-properties -- - --json
//!
//! The tests in this file only build with the feature enabled:
//!   cargo test --features cli --bin bs-properties

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::Level;

use basespace_sdk::inspect::{parse_container, read_input, summarize, PropertySummary};
use basespace_sdk::{
    logging, property_types, AppResultCompact, AppSessionCompact, ApplicationCompact,
    ClientSettings, FileCompact, ProjectCompact, Property, PropertyExt, ResourceKind,
    ResourceReference, RunCompact, SampleCompact, UserCompact,
};

/// Inspect the properties of a saved BaseSpace response
#[derive(Parser, Debug)]
#[command(name = "bs-properties")]
#[command(about = "Inspect the properties of a saved BaseSpace response")]
struct Args {
    /// Response file (envelope or bare property container), "-" for stdin
    input: PathBuf,

    /// Only show the property with this name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Narrow the selected property: string, int, long, date, string[], int[], long[],
    /// or a resource kind such as sample / sample[]
    #[arg(long = "as", short = 'a', value_parser = parse_narrowing, requires = "name")]
    narrow_as: Option<Narrowing>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// API base URL for resolving hrefs (overrides BASESPACE_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Narrowing {
    String,
    Int,
    Long,
    Date,
    StringArray,
    IntArray,
    LongArray,
    Resource(String),
    ResourceArray(String),
}

fn parse_narrowing(raw: &str) -> std::result::Result<Narrowing, String> {
    let narrowing = match raw {
        "string" => Narrowing::String,
        "int" => Narrowing::Int,
        "long" => Narrowing::Long,
        "date" => Narrowing::Date,
        "string[]" => Narrowing::StringArray,
        "int[]" => Narrowing::IntArray,
        "long[]" => Narrowing::LongArray,
        other => {
            let (kind, list) = match other.strip_suffix(property_types::LIST_SUFFIX) {
                Some(kind) => (kind, true),
                None => (other, false),
            };
            if !ResourceReference::is_known_tag(kind) {
                return Err(format!("unknown narrowing '{}'", raw));
            }
            if list {
                Narrowing::ResourceArray(kind.to_string())
            } else {
                Narrowing::Resource(kind.to_string())
            }
        }
    };
    Ok(narrowing)
}

fn narrow_records<R: ResourceKind + Serialize>(property: &Property, list: bool) -> Result<Value> {
    let value = if list {
        serde_json::to_value(property.to_resource_array::<R>())?
    } else {
        serde_json::to_value(property.to_resource::<R>())?
    };
    Ok(value)
}

fn narrow_resource(property: &Property, kind: &str, list: bool) -> Result<Value> {
    match kind {
        property_types::SAMPLE => narrow_records::<SampleCompact>(property, list),
        property_types::APPRESULT => narrow_records::<AppResultCompact>(property, list),
        property_types::PROJECT => narrow_records::<ProjectCompact>(property, list),
        property_types::APPSESSION => narrow_records::<AppSessionCompact>(property, list),
        property_types::RUN => narrow_records::<RunCompact>(property, list),
        property_types::APPLICATION => narrow_records::<ApplicationCompact>(property, list),
        property_types::USER => narrow_records::<UserCompact>(property, list),
        property_types::FILE => narrow_records::<FileCompact>(property, list),
        other => bail!("unknown resource kind '{}'", other),
    }
}

fn narrow(property: &Property, narrowing: &Narrowing) -> Result<Value> {
    let value = match narrowing {
        Narrowing::String => json!(property.to_string_value()),
        Narrowing::Int => json!(property.to_int()),
        Narrowing::Long => json!(property.to_long()),
        Narrowing::Date => json!(property.to_date_time().map(|d| d.to_rfc3339())),
        Narrowing::StringArray => json!(property.to_string_array()),
        Narrowing::IntArray => json!(property.to_int_array()),
        Narrowing::LongArray => json!(property.to_long_array()),
        Narrowing::Resource(kind) => narrow_resource(property, kind, false)?,
        Narrowing::ResourceArray(kind) => narrow_resource(property, kind, true)?,
    };
    Ok(value)
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn print_summary(summary: &PropertySummary) {
    let mut line = format!(
        "  {} {} {}",
        summary.name.cyan().bold(),
        format!("({})", summary.property_type).dimmed(),
        summary.value
    );
    if summary.truncated {
        line.push_str(&format!(" {}", "TRUNCATED".yellow().bold()));
    }
    println!("{}", line);
    if let Some(url) = &summary.items_url {
        println!("    {} {}", "more items:".dimmed(), url);
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    logging::init(Level::WARN);

    let args = Args::parse();

    let mut settings = ClientSettings::from_env()?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
        settings.validate()?;
    }

    let text = read_input(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let container = parse_container(&text).context("Input is not a property response")?;

    let selected: Vec<&Property> = match &args.name {
        Some(name) => {
            let property = container
                .find_property(name)
                .ok_or_else(|| anyhow!("Property '{}' not found", name))?;
            vec![property]
        }
        None => container.iter().collect(),
    };

    let summaries = selected
        .iter()
        .map(|p| summarize(p, &settings))
        .collect::<basespace_sdk::Result<Vec<_>>>()?;

    let narrowed = match (&args.narrow_as, selected.first()) {
        (Some(narrowing), Some(property)) => Some(narrow(property, narrowing)?),
        _ => None,
    };

    if args.json {
        let output = json!({
            "displayed_count": container.displayed_count,
            "total_count": container.total_count,
            "truncated": container.is_truncated(),
            "properties": summaries,
            "narrowed": narrowed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let header = format!(
        "Properties: {} of {}",
        container.displayed_count, container.total_count
    );
    if container.is_truncated() {
        println!("{} {}", header.bold(), "(truncated)".yellow());
    } else {
        println!("{}", header.bold());
    }

    for summary in &summaries {
        print_summary(summary);
    }

    if let Some(value) = narrowed {
        println!();
        if is_absent(&value) {
            println!("{} {}", "Narrowed:".cyan().bold(), "(not present)".dimmed());
        } else {
            println!(
                "{} {}",
                "Narrowed:".cyan().bold(),
                serde_json::to_string_pretty(&value)?
            );
        }
    }

    Ok(())
}
