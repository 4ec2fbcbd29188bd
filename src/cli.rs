//! CLI: clap definitions and command execution for `scc-bootstrap`.

use crate::bootstrap::{bootstrap, Outcome};
use crate::error::BootstrapError;
use crate::settings::ClientSettings;
use crate::source::seed_from_files;
use crate::store::MemoryStore;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::PathBuf;
use tracing::info;

/// Fetch configuration from a Spring Cloud Config Server
#[derive(Parser, Debug)]
#[command(name = "scc-bootstrap")]
#[command(about = "Merge Spring Cloud Config Server properties under local configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path (overrides the default settings location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Config server environment URL (overrides SCC_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Authorization header value (overrides SCC_AUTHORIZATION)
    #[arg(long, global = true)]
    pub authorization: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch properties and print the merged result
    Fetch {
        /// Local property files (.toml or .json) that take priority over the
        /// config server; later files override earlier ones
        #[arg(long = "local")]
        local: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print resolved client settings with the authorization value masked
    ShowSettings,
}

/// How `fetch` prints the merged properties.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Fold CLI overrides into loaded settings.
    pub fn apply_overrides(&self, settings: &mut ClientSettings) {
        if let Some(ref url) = self.url {
            settings.url = url.clone();
        }
        if let Some(ref authorization) = self.authorization {
            settings.authorization = authorization.clone();
        }
        if self.insecure {
            settings.disable_tls = true;
        }

        let logging = &mut settings.logging;
        if self.quiet {
            logging.enabled = false;
        }
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(ref level) = self.log_level {
            logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            logging.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            logging.output = output.clone();
        }
    }
}

/// Run one command against resolved settings and return what to print.
pub async fn execute(command: &Commands, settings: &ClientSettings) -> Result<String, BootstrapError> {
    match command {
        Commands::Fetch { local, format } => {
            let store = MemoryStore::new();
            if !local.is_empty() {
                let written = seed_from_files(local, &store)?;
                info!(written, files = local.len(), "Loaded local properties");
            }

            match bootstrap(&settings.to_request(), &store).await? {
                Outcome::NotConfigured => Ok(
                    "No config server URL configured (set SCC_URL or --url); nothing fetched."
                        .to_string(),
                ),
                Outcome::Merged(_) => format_store(&store, *format),
            }
        }
        Commands::ShowSettings => toml::to_string_pretty(&settings.redacted())
            .map_err(|e| BootstrapError::Settings(format!("Failed to render settings: {}", e))),
    }
}

/// Render store contents as a table or a JSON object.
pub fn format_store(store: &MemoryStore, format: OutputFormat) -> Result<String, BootstrapError> {
    let snapshot = store.snapshot();
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(&snapshot)
            .map_err(|e| BootstrapError::Settings(format!("Failed to render JSON: {}", e)));
    }

    if snapshot.is_empty() {
        return Ok("No properties.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Type", "Value"]);
    for (key, value) in &snapshot {
        table.add_row(vec![key.clone(), value.kind().to_string(), value.to_string()]);
    }
    Ok(table.to_string())
}
