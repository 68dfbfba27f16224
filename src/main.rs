//! `survey-runtime` command line.
//!
//! - `choices`: resolve a `choicesByUrl` descriptor against a live endpoint and
//!   print the items as JSON
//! - `load`: build an object from a JSON file through the class registry and
//!   print its serialized form plus any properties that were not loaded
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`; `--verbose` for debug).
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use survey_runtime::args::{ChoicesArgs, Cli, Command, LoadArgs};
use survey_runtime::default_registry;
use survey_runtime::resolver::{ChoicesByUrl, ChoicesCache, ResolverConfig, RunOutcome};
use survey_runtime::transport::{HttpTransport, UreqTransport};
use survey_runtime::types::{StringTable, TemplateTextProcessor};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let transport: Arc<dyn HttpTransport> = Arc::new(UreqTransport::new());
    let cache = Arc::new(ChoicesCache::new());

    match cli.command {
        Command::Choices(args) => run_choices(args, transport, cache).await,
        Command::Load(args) => run_load(args, transport, cache),
    }
}

async fn run_choices(
    args: ChoicesArgs,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ChoicesCache>,
) -> Result<()> {
    let registry = default_registry(transport.clone(), cache.clone());
    let mut processor = TemplateTextProcessor::new();
    for (name, value) in &args.vars {
        processor.set_value(name, value.clone());
    }

    let mut resolver = ChoicesByUrl::new(transport, cache.clone())
        .with_config(ResolverConfig::from_env())
        .with_registry(registry)
        .with_url(&args.url)
        .with_path(&args.path)
        .with_value_name(&args.value_name)
        .with_title_name(&args.title_name);
    let mut results = resolver.subscribe();

    let outcome = resolver.run(Some(&processor)).await;
    debug!(?outcome, "choices run finished");

    if args.stats {
        eprintln!("{}", cache.metrics().snapshot().format_report());
    }

    if outcome == RunOutcome::ShortCircuitEmpty {
        return Err(anyhow!(
            "unresolved placeholders in '{}' (pass them with --var NAME=VALUE)",
            args.url
        ));
    }
    if let Some(error) = resolver.error() {
        return Err(anyhow!("{}", error.message(&StringTable::from_env())));
    }

    let items = results
        .try_recv()
        .map_err(|_| anyhow!("resolver delivered no result"))?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn run_load(
    args: LoadArgs,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ChoicesCache>,
) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let json: Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} as JSON", args.file.display()))?;

    let registry = default_registry(transport, cache);
    let (object, report) = match &args.type_name {
        Some(type_name) => registry
            .create_from_json(type_name, &json)
            .ok_or_else(|| anyhow!("unknown type '{}'", type_name))?,
        None => {
            let type_name = json
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow!("no --type given and the object has no \"type\" field"))?;
            registry
                .object_from_json(&json)
                .ok_or_else(|| anyhow!("unknown type '{}'", type_name))?
        }
    };

    let output = json!({
        "type": object.type_name(),
        "object": registry.to_json(object.as_ref()),
        "unknownProperties": report.unknown_properties,
        "rejectedProperties": report.rejected_properties,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
