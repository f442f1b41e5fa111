use super::demo::demo_dispatcher;
use crate::runtime_config::RuntimeConfig;
use crate::router::HandlerMapping;
use crate::server::{HttpRequest, HttpResponse, ResponseAction};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Command-line interface for brrtmvc
#[derive(Parser, Debug)]
#[command(name = "brrtmvc")]
#[command(about = "Dispatch requests through the brrtmvc pipeline", long_about = None)]
pub struct Cli {
    /// YAML runtime configuration file
    #[arg(long, global = true, env = "BRRTMVC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Template directory (overrides the configuration)
    #[arg(long, global = true)]
    pub templates: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one request and print the response action
    Dispatch {
        /// HTTP method, any letter case
        method: String,

        /// Request target, optionally with a query string
        target: String,

        /// Request parameter as KEY=VALUE (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Request header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// List the routing table
    Routes,
}

/// Log format: JSON for machines, pretty-print for people
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected 'Name: value', got '{s}'"))
}

/// Install the global tracing subscriber, writing to stderr
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

fn load_config(cli: &Cli) -> anyhow::Result<RuntimeConfig> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RuntimeConfig::from_env(),
    };
    if let Some(dir) = &cli.templates {
        config.template_dir = dir.clone();
    }
    Ok(config)
}

/// Render a committed response as the lines the CLI prints
#[must_use]
pub(crate) fn describe_response(response: &HttpResponse) -> Vec<String> {
    let mut lines = vec![response.status_line()];
    for (name, value) in response.headers() {
        lines.push(format!("{name}: {value}"));
    }
    match response.action() {
        Some(ResponseAction::Forward { location, body, .. }) => {
            lines.push(format!("x-forwarded-template: {location}"));
            lines.push(String::new());
            lines.push(body.clone());
        }
        Some(ResponseAction::Json { body }) => {
            lines.push(String::new());
            lines.push(body.to_string());
        }
        Some(ResponseAction::Redirect { .. } | ResponseAction::NotFound | ResponseAction::ServerError)
        | None => {}
    }
    lines
}

/// Run a parsed command line
///
/// # Errors
///
/// Configuration, registration, or request-construction failures. A
/// request that dispatches to an error status is not an error here; the
/// status is printed like any other.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let dispatcher = demo_dispatcher(config)?;

    match cli.command {
        Commands::Dispatch {
            method,
            target,
            params,
            headers,
        } => {
            let mut request = HttpRequest::parse(&method, &target)?;
            for (name, value) in headers {
                request = request.with_header(&name, value);
            }
            for (name, value) in params {
                request = request.with_param(name, value);
            }

            let mut response = HttpResponse::new();
            // Failures are already logged and committed as a status
            if let Err(err) = dispatcher.dispatch(&request, &mut response) {
                debug!(error = %err, "Request ended with an error status");
            }

            for line in describe_response(&response) {
                println!("{line}");
            }
        }
        Commands::Routes => {
            for mapping in dispatcher.mappings().mappings() {
                match mapping {
                    HandlerMapping::Annotated(table) => {
                        for (key, descriptor) in table.iter() {
                            println!("{key:<32} -> {}", descriptor.name);
                        }
                    }
                    HandlerMapping::Legacy(legacy) => {
                        for path in legacy.paths() {
                            println!("{:<32} -> legacy controller", format!("* {path}"));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
