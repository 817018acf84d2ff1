use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use toolstrip_engine::{Measure, Partition, partition};
use toolstrip_types::{DEFAULT_OVERFLOW_TRIGGER_WIDTH, ToolbarConfig};
use toolstrip_util::{load_config, validate_config};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "toolstrip", version, about = "Overflow-aware terminal toolbar")]
struct Cli {
    /// Path to the toolbar configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Impose the toolbar width in cells instead of measuring it
    #[arg(long, global = true)]
    width: Option<u16>,
    /// Quiet period applied to terminal resizes
    #[arg(long = "debounce-ms", global = true)]
    debounce_ms: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Partition item widths without a terminal and print the result as JSON
    Partition {
        /// Available width in cells, or `none` to probe
        #[arg(long)]
        available: AvailableWidth,
        /// Width reserved for the overflow trigger
        #[arg(long, default_value_t = DEFAULT_OVERFLOW_TRIGGER_WIDTH)]
        trigger: u16,
        /// Item widths; defaults to the configured items
        #[arg(long, value_delimiter = ',')]
        widths: Vec<u16>,
    },
}

/// `--available` value: a cell count or `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AvailableWidth(Option<u16>);

impl FromStr for AvailableWidth {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("none") {
            return Ok(Self(None));
        }
        value
            .parse::<u16>()
            .map(|width| Self(Some(width)))
            .map_err(|e| format!("expected a width in cells or `none`: {e}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MeasuredItem {
    id: String,
    width: u16,
}

impl Measure for MeasuredItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn width(&self) -> u16 {
        self.width
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none())?;
    let config = resolve_config(&cli)?;

    match cli.command {
        // No subcommand => TUI
        None => toolstrip_tui::run(config).await,
        Some(Command::Partition {
            available,
            trigger,
            widths,
        }) => {
            let items = partition_items(&config, widths);
            let report = partition_report(&items, available.0, trigger);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// Installs the tracing subscriber. The interactive UI owns the terminal,
/// so its logs go to a file; headless commands log to stderr.
fn init_tracing(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if interactive {
        let (file, path) = toolstrip_tui::open_log_file()?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        debug!(path = %path.display(), "logging to file");
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

/// Loads the configuration file and applies flag overrides.
fn resolve_config(cli: &Cli) -> Result<ToolbarConfig> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load toolbar configuration")?;
    if let Some(width) = cli.width {
        config.width = Some(width);
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    validate_config(&config)?;
    info!(items = config.items.len(), width = ?config.width, "toolbar configured");
    Ok(config)
}

/// Items to partition: explicit widths get positional ids, otherwise the
/// configured items are measured.
fn partition_items(config: &ToolbarConfig, widths: Vec<u16>) -> Vec<MeasuredItem> {
    if widths.is_empty() {
        return toolstrip_tui::measure_items(&config.items)
            .into_iter()
            .map(|(id, width)| MeasuredItem { id, width })
            .collect();
    }
    widths
        .into_iter()
        .enumerate()
        .map(|(index, width)| MeasuredItem {
            id: format!("item-{index}"),
            width,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct PartitionReport<'a> {
    available: Option<u16>,
    trigger: u16,
    needs_trigger: bool,
    #[serde(flatten)]
    partition: Partition<&'a MeasuredItem>,
}

fn partition_report(items: &[MeasuredItem], available: Option<u16>, trigger: u16) -> PartitionReport<'_> {
    let partition = partition(items, available, trigger);
    PartitionReport {
        available,
        trigger,
        needs_trigger: partition.needs_trigger(),
        partition,
    }
}
