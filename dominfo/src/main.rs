//! dominfo CLI Application
//!
//! A command-line interface for looking up domain registration data over
//! WHOIS. This application is a thin layer over dominfo-lib: it resolves
//! configuration, runs one lookup, and renders the result.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use dominfo_lib::{
    load_env_config, parse_timeout_string, ConfigManager, DomainLookup, FileConfig, LookupConfig,
};
use std::process;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for dominfo
#[derive(Parser, Debug)]
#[command(name = "dominfo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up domain registration data over WHOIS")]
#[command(
    long_about = "Look up domain registration data over WHOIS.\n\nAsks a root referral server for the authoritative WHOIS server, queries it, and extracts registrar, dates, name servers, and DNSSEC status."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain name to look up
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Root referral server [default: whois.iana.org]
    #[arg(
        short = 's',
        long = "root-server",
        visible_alias = "iana-server",
        value_name = "HOST",
        help_heading = "Connection"
    )]
    pub root_server: Option<String>,

    /// Socket timeout (e.g. 5s, 1m) [default: 10s]
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "DURATION",
        help_heading = "Connection"
    )]
    pub timeout: Option<String>,

    /// WHOIS port [default: 43]
    #[arg(long = "port", value_name = "PORT", help_heading = "Connection")]
    pub port: Option<u16>,

    /// Output as JSON
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Print the authoritative server's unparsed response
    #[arg(long = "raw", conflicts_with = "json", help_heading = "Output Format")]
    pub raw: bool,

    /// Use a specific config file instead of discovered ones
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show debug logging on stderr
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Lookup settings after applying config files, environment, and flags.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedSettings {
    lookup: LookupConfig,
    json: bool,
    pretty: bool,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            json: false,
            pretty: true,
        }
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    debug!(?settings, "Resolved settings");

    let lookup = DomainLookup::with_config(settings.lookup);

    if args.raw {
        let raw = lookup.lookup_raw(&args.domain)?;
        ui::print_raw(&raw);
        return Ok(());
    }

    let record = lookup.lookup(&args.domain)?;
    if settings.json {
        let json = if settings.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        println!("{}", json);
    } else {
        ui::print_record(&args.domain, &record);
    }

    Ok(())
}

/// Resolve settings with precedence: defaults < config file < env < CLI.
fn build_settings(args: &Args) -> Result<ResolvedSettings, Box<dyn std::error::Error>> {
    let mut settings = ResolvedSettings::default();

    let env_config = load_env_config();
    let config_manager = ConfigManager::new();

    // Step 1: config files
    if let Some(explicit_config_path) = args.config.as_ref().or(env_config.config.as_ref()) {
        debug!(path = %explicit_config_path, "Using explicit config file");
        let file_config = config_manager
            .load_file(explicit_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_config_path, e))?;
        settings = merge_file_config(settings, file_config)?;
    } else {
        match config_manager.discover_and_load() {
            Ok(file_config) => settings = merge_file_config(settings, file_config)?,
            Err(e) => warn!("Config discovery warning: {}", e),
        }
    }

    // Step 2: environment variables (DOMINFO_*)
    if let Some(root_server) = env_config.root_server {
        settings.lookup = settings.lookup.with_root_server(root_server);
    }
    if let Some(timeout) = env_config.timeout {
        settings.lookup = settings.lookup.with_timeout(parse_duration(&timeout)?);
    }
    if let Some(port) = env_config.port {
        settings.lookup = settings.lookup.with_port(port);
    }
    if let Some(json) = env_config.json {
        settings.json = json;
    }

    // Step 3: CLI arguments (highest precedence)
    apply_cli_args(settings, args)
}

fn merge_file_config(
    mut settings: ResolvedSettings,
    file_config: FileConfig,
) -> Result<ResolvedSettings, Box<dyn std::error::Error>> {
    let Some(defaults) = file_config.defaults else {
        return Ok(settings);
    };

    if let Some(root_server) = defaults.root_server {
        settings.lookup = settings.lookup.with_root_server(root_server);
    }
    if let Some(timeout) = defaults.timeout {
        settings.lookup = settings.lookup.with_timeout(parse_duration(&timeout)?);
    }
    if let Some(port) = defaults.port {
        settings.lookup = settings.lookup.with_port(port);
    }
    if let Some(json) = defaults.json {
        settings.json = json;
    }
    if let Some(pretty) = defaults.pretty {
        settings.pretty = pretty;
    }

    Ok(settings)
}

fn apply_cli_args(
    mut settings: ResolvedSettings,
    args: &Args,
) -> Result<ResolvedSettings, Box<dyn std::error::Error>> {
    if let Some(root_server) = &args.root_server {
        let root_server = root_server.trim();
        if root_server.is_empty() {
            return Err("Root server cannot be empty".into());
        }
        settings.lookup = settings.lookup.with_root_server(root_server);
    }
    if let Some(timeout) = &args.timeout {
        settings.lookup = settings.lookup.with_timeout(parse_duration(timeout)?);
    }
    if let Some(port) = args.port {
        if port == 0 {
            return Err("Port must be between 1 and 65535".into());
        }
        settings.lookup = settings.lookup.with_port(port);
    }
    if args.json {
        settings.json = true;
    }

    Ok(settings)
}

/// Parse "5s" / "2m" / "30" into a non-zero duration.
fn parse_duration(timeout_str: &str) -> Result<Duration, Box<dyn std::error::Error>> {
    match parse_timeout_string(timeout_str) {
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(format!(
            "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
            timeout_str
        )
        .into()),
    }
}
