//! ShareSentry CLI
//!
//! Thin composer/results surface over the core: builds a submission from
//! flags, runs the enabled agents, and prints findings plus the danger
//! score. Agent configuration and the transport mode persist under
//! `~/.sharesentry/settings.json`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sharesentry::{
    compute_danger, AgentId, AgentRegistry, FileStore, PiiMasker, Submission, TransportMode,
    UploadedMedia,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sharesentry")]
#[command(version)]
#[command(about = "Privacy risk scanner for social media posts")]
struct Cli {
    /// Settings file path
    #[arg(long, env = "SHARESENTRY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a post before sharing it
    Scan {
        /// Post text
        #[arg(short, long, default_value = "")]
        text: String,

        /// Attached media file (repeatable)
        #[arg(short, long)]
        media: Vec<PathBuf>,

        /// Transport override for this scan (defaults to the persisted mode)
        #[arg(long)]
        mode: Option<TransportMode>,

        /// Print raw JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change agent configuration
    Agents {
        #[command(subcommand)]
        command: AgentCommands,
    },

    /// Show or set the persisted transport mode
    Mode {
        /// New mode ("mock" or "http"); omit to show the current one
        mode: Option<TransportMode>,
    },

    /// Run the PII masker on a piece of text
    Mask {
        /// Text to mask
        #[arg(short, long)]
        text: String,
    },
}

#[derive(Subcommand)]
enum AgentCommands {
    /// List all agents
    List,

    /// Update one agent's configuration
    Set {
        /// Agent id (text-leak, reverse-image, redaction)
        id: String,

        #[arg(long)]
        enabled: Option<bool>,

        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("sharesentry={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings_path = cli.settings.unwrap_or_else(FileStore::default_path);
    let store = Arc::new(FileStore::new(settings_path)?);
    let registry = AgentRegistry::new(store)?;

    match cli.command {
        Commands::Scan {
            text,
            media,
            mode,
            json,
        } => run_scan(&registry, text, media, mode, json).await?,
        Commands::Agents { command } => match command {
            AgentCommands::List => list_agents(&registry).await,
            AgentCommands::Set {
                id,
                enabled,
                base_url,
                api_key,
                name,
            } => set_agent(&registry, &id, enabled, base_url, api_key, name).await?,
        },
        Commands::Mode { mode } => match mode {
            Some(mode) => {
                registry.set_mode(mode);
                println!("Transport mode set to {}", mode);
            }
            None => println!("{}", registry.mode()),
        },
        Commands::Mask { text } => run_mask(&text)?,
    }

    Ok(())
}

async fn run_scan(
    registry: &AgentRegistry,
    text: String,
    media: Vec<PathBuf>,
    mode: Option<TransportMode>,
    json: bool,
) -> Result<()> {
    let media = media.into_iter().map(UploadedMedia::from_path).collect();
    let submission = Submission::new(text, media);
    let mode = mode.unwrap_or_else(|| registry.mode());

    let outputs = registry
        .run_all(&submission, mode)
        .await
        .context("Scan failed; no partial results were produced")?;
    let score = compute_danger(&outputs);

    if json {
        let report = serde_json::json!({ "score": score, "outputs": outputs });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Danger score: {}/100", score.value);
    for reason in &score.reasons {
        println!("  - {}", reason);
    }
    if score.reasons.is_empty() {
        println!("  no findings");
    }

    for output in &outputs {
        println!();
        println!("[{}] {} finding(s)", output.agent, output.findings.len());
        for finding in &output.findings {
            print!("  {} {}", finding.severity, finding.title);
            if let Some(url) = &finding.url {
                print!(" ({})", url);
            }
            println!();
            if let Some(description) = &finding.description {
                println!("    {}", description);
            }
        }
    }

    Ok(())
}

async fn list_agents(registry: &AgentRegistry) {
    for cfg in registry.list().await {
        let state = if cfg.enabled { "enabled" } else { "disabled" };
        let endpoint = cfg.base_url.as_deref().unwrap_or("-");
        println!("{:<14} {:<9} {:<26} {}", cfg.id, state, cfg.name, endpoint);
    }
}

async fn set_agent(
    registry: &AgentRegistry,
    id: &str,
    enabled: Option<bool>,
    base_url: Option<String>,
    api_key: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let Some(id) = AgentId::parse(id) else {
        bail!("unknown agent '{}'; expected one of text-leak, reverse-image, redaction", id);
    };
    let mut cfg = registry
        .get(id)
        .await
        .context("agent configuration missing")?;

    if let Some(enabled) = enabled {
        cfg.enabled = enabled;
    }
    if let Some(base_url) = base_url {
        cfg.base_url = if base_url.is_empty() { None } else { Some(base_url) };
    }
    if let Some(api_key) = api_key {
        cfg.api_key = if api_key.is_empty() { None } else { Some(api_key) };
    }
    if let Some(name) = name {
        cfg.name = name;
    }

    registry.update(cfg).await;
    println!("Updated {}", id);
    Ok(())
}

fn run_mask(text: &str) -> Result<()> {
    let masker = PiiMasker::new()?;
    let outcome = masker.mask(text);
    println!("{}", outcome.masked);
    for token in &outcome.tokens {
        // Raw values are shown locally only; they never leave the process.
        println!("  {} {} -> {}", token.kind, token.raw, token.hash);
    }
    Ok(())
}
