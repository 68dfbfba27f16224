use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Debug-level logging (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a remote choice list and print the items as JSON.
    Choices(ChoicesArgs),
    /// Load an object from a JSON file through the class registry.
    Load(LoadArgs),
}

#[derive(Debug, clap::Args)]
pub struct ChoicesArgs {
    /// URL template; `{name}` placeholders are filled from `--var`.
    #[arg(long)]
    pub url: String,

    /// Path into the response (`a,b` or `a;b`).
    #[arg(long, default_value = "")]
    pub path: String,

    /// Field holding the item value (dotted names allowed).
    #[arg(long, default_value = "")]
    pub value_name: String,

    /// Field holding the item title (default: `title`).
    #[arg(long, default_value = "")]
    pub title_name: String,

    /// Template variable, `name=value`. Values that parse as JSON are used as JSON.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,

    /// Print cache/request counters to stderr.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Debug, clap::Args)]
pub struct LoadArgs {
    /// JSON file with a single object.
    pub file: PathBuf,

    /// Registered type name; defaults to the object's `type` field.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: Option<String>,
}

/// Parse `name=value`.
pub fn parse_var(s: &str) -> Result<(String, Value), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var("country=ca"), Ok(("country".to_string(), json!("ca"))));
        assert_eq!(parse_var("limit=10"), Ok(("limit".to_string(), json!(10))));
        assert_eq!(parse_var("q=a=b"), Ok(("q".to_string(), json!("a=b"))));
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from([
            "survey-runtime",
            "choices",
            "--url",
            "http://x/{c}",
            "--var",
            "c=ca",
            "--stats",
        ]);
        match cli.command {
            Command::Choices(args) => {
                assert_eq!(args.vars, vec![("c".to_string(), json!("ca"))]);
                assert!(args.stats);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["survey-runtime", "-v", "load", "form.json", "--type", "page"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Load(LoadArgs { type_name: Some(ref t), .. }) if t == "page"));
    }
}
