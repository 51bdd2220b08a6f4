//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use tracing::{info, warn};

use citelens_classifier::SourceClassifier;
use citelens_classifier::domain::host_from_url;
use citelens_core::{EvidenceEngine, load_entities};
use citelens_shared::{
    AppConfig, CitationRecord, FactType, ReferenceData, SourceType, init_config, load_config,
    load_reference_data,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// citelens: how visible and trustworthy is an entity to AI answer engines?
#[derive(Parser)]
#[command(
    name = "citelens",
    version,
    about = "Classify citations, extract facts, and score evidence consensus for an entity.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the evidence graph and fact consensus for entities in a JSON file.
    Analyze {
        /// Entity JSON file (one object or an array).
        input: PathBuf,

        /// Reference-data TOML (overrides config).
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Score consensus for this fact type only.
        #[arg(long)]
        fact_type: Option<FactType>,

        /// Single-line JSON output.
        #[arg(long)]
        compact: bool,
    },

    /// Classify one cited URL.
    Classify {
        url: String,

        /// Reported domain (defaults to the URL host).
        #[arg(long)]
        domain: Option<String>,

        /// Reference-data TOML (overrides config).
        #[arg(long)]
        reference: Option<PathBuf>,
    },

    /// Extract facts from a text blob.
    Extract {
        /// Text to scan.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// File whose contents to scan.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Source type attributed to the facts.
        #[arg(long, default_value = "user_generated")]
        source_type: SourceType,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "citelens=warn",
        1 => "citelens=info",
        2 => "citelens=debug",
        _ => "citelens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            input,
            reference,
            fact_type,
            compact,
        } => cmd_analyze(&input, reference.as_deref(), fact_type, compact),
        Command::Classify {
            url,
            domain,
            reference,
        } => cmd_classify(&url, domain.as_deref(), reference.as_deref()),
        Command::Extract {
            text,
            file,
            source_type,
        } => cmd_extract(text, file.as_deref(), source_type),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_analyze(
    input: &Path,
    reference: Option<&Path>,
    fact_type: Option<FactType>,
    compact: bool,
) -> Result<()> {
    let config = load_config()?;
    let engine = EvidenceEngine::new(resolve_reference(&config, reference));

    let entities = load_entities(input)?;
    info!(
        input = %input.display(),
        entities = entities.len(),
        fact_type = fact_type.map(|t| t.as_str()).unwrap_or("all"),
        "analyzing"
    );

    let mut analyses = engine.analyze_batch_with_filter(&entities, fact_type);
    let pretty = config.output.pretty && !compact;

    if analyses.len() == 1 {
        let analysis = analyses
            .pop()
            .ok_or_else(|| eyre!("analysis produced no output"))?;
        print_json(&analysis, pretty)
    } else {
        print_json(&analyses, pretty)
    }
}

fn cmd_classify(url: &str, domain: Option<&str>, reference: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let classifier = SourceClassifier::new(resolve_reference(&config, reference));

    let domain = match domain {
        Some(d) => d.to_string(),
        None => host_from_url(url).unwrap_or_default(),
    };
    let result = classifier.classify(&CitationRecord::new(url, domain));
    print_json(&result, config.output.pretty)
}

fn cmd_extract(text: Option<String>, file: Option<&Path>, source_type: SourceType) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?,
        (None, None) => return Err(eyre!("either --text or --file is required")),
    };

    let facts = citelens_extractor::extract(&text, "cli", source_type);
    info!(count = facts.len(), "facts extracted");
    print_json(&facts, load_config()?.output.pretty)
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Flag path, else configured path, else empty tables.
fn resolve_reference(config: &AppConfig, flag: Option<&Path>) -> Arc<ReferenceData> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| config.reference.resolved_path());
    let loaded = load_reference_data(path.as_deref());
    if loaded.using_defaults() {
        warn!("no reference data loaded; every citation will classify as user_generated");
    }
    Arc::new(loaded.data)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_flags_parse() {
        let cli = Cli::try_parse_from([
            "citelens",
            "analyze",
            "entities.json",
            "--fact-type",
            "phone",
            "--compact",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Analyze {
                input,
                fact_type,
                compact,
                reference,
            } => {
                assert_eq!(input, PathBuf::from("entities.json"));
                assert_eq!(fact_type, Some(FactType::Phone));
                assert!(compact);
                assert!(reference.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn unknown_fact_type_is_rejected() {
        let result = Cli::try_parse_from(["citelens", "analyze", "x.json", "--fact-type", "email"]);
        assert!(result.is_err());
    }

    #[test]
    fn extract_requires_exactly_one_input() {
        assert!(Cli::try_parse_from(["citelens", "extract"]).is_err());
        assert!(
            Cli::try_parse_from(["citelens", "extract", "--text", "a", "--file", "b.txt"]).is_err()
        );

        let cli = Cli::try_parse_from([
            "citelens",
            "extract",
            "--text",
            "Call 217-555-0142",
            "--source-type",
            "directory",
        ])
        .expect("parse");
        match cli.command {
            Command::Extract { source_type, .. } => assert_eq!(source_type, SourceType::Directory),
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn json_log_format_is_global() {
        let cli = Cli::try_parse_from([
            "citelens",
            "classify",
            "https://yelp.com/x",
            "--log-format",
            "json",
        ])
        .expect("parse");
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn explicit_reference_path_wins() {
        let config = AppConfig::default();
        let data = resolve_reference(
            &config,
            Some(Path::new("../../fixtures/reference/reference-data.toml")),
        );
        assert!(data.publishers.contains_key("nytimes.com"));

        let empty = resolve_reference(&config, Some(Path::new("/nonexistent/reference.toml")));
        assert!(empty.is_empty());
    }
}
