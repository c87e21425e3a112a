use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::request::blocklist::Blocklist;
use crate::request::parser::RequestParser;
use crate::response::builder::OfferSettings;
use crate::service::autofill_service::AutofillService;
use crate::service::error::{AutofillError, AutofillResult};
use crate::session::store::FillSession;
use crate::trace::logger::TraceLogger;

pub const DEFAULT_CONFIG_PATH: &str = "autofill.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "autofill-protocol",
    version,
    about = "Credential field classification and authenticated autofill harness"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append protocol trace events (JSON lines) to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every window of a structure snapshot
    Classify {
        /// JSON structure snapshot
        #[arg(long)]
        snapshot: String,
    },

    /// Parse a fill request into a fillable login request
    Parse {
        /// JSON fill request
        #[arg(long)]
        request: String,
    },

    /// Parse a fill request and build the authentication-gated offer
    Offer {
        /// JSON fill request
        #[arg(long)]
        request: String,
    },

    /// Run offer and completion end to end with the given credentials
    Complete {
        /// JSON fill request
        #[arg(long)]
        request: String,

        /// Username of the selected entry
        #[arg(long)]
        username: Option<String>,

        /// Password of the selected entry
        #[arg(long)]
        password: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `autofill.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub offer: OfferSettings,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Package of the app hosting this service; it is never filled.
    #[serde(default = "default_host_package")]
    pub host_package: String,

    /// Extra callers to refuse: package names or full URIs.
    #[serde(default)]
    pub excluded: Vec<String>,

    #[serde(default = "default_true")]
    pub inline_enabled: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            host_package: default_host_package(),
            excluded: Vec::new(),
            inline_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_host_package() -> String { "com.onekeepass".to_string() }
fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Strict variant for an explicitly named file: missing or malformed is an error.
pub fn try_load_config(path: &str) -> AutofillResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| AutofillError::Io {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| AutofillError::Config {
        path: path.to_string(),
        source,
    })
}

// ============================================================================
// Service Builders (merge CLI args with config file)
// ============================================================================

pub fn build_parser(config: &ParserConfig) -> RequestParser {
    let blocklist = Blocklist::new(&config.host_package).with_exclusions(&config.excluded);
    RequestParser::new(blocklist).with_inline_enabled(config.inline_enabled)
}

/// CLI `--trace` wins over the config file and must be writable; the
/// config file's trace path is best effort.
pub fn build_service(config: &AppConfig, trace_override: Option<&str>) -> AutofillResult<AutofillService> {
    let tracer = match (trace_override, config.trace.path.as_deref()) {
        (Some(path), _) => TraceLogger::open(path)?,
        (None, Some(path)) => TraceLogger::new(path),
        (None, None) => TraceLogger::disabled(),
    };

    Ok(AutofillService::new(
        build_parser(&config.parser),
        config.offer.clone(),
        FillSession::shared(),
        tracer,
    ))
}
