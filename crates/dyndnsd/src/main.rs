// # dyndnsd - Dynamic DNS Daemon
//
// Thin integration shell: parse and validate configuration, initialize
// tracing, build the HTTP clients, and hand the reconciler to the
// scheduler. All reconciliation logic lives in dyndns-core.
//
// ## Configuration
//
// Every option is a flag with an environment-variable fallback:
//
// - `--token` / `DIGITALOCEAN_TOKEN`: API access token (required)
// - `--domain` / `DIGITALOCEAN_DOMAIN`: domain to update (required)
// - `--name` / `DIGITALOCEAN_NAME`: record name to update (required)
// - `--interval` / `DIGITALOCEAN_INTERVAL`: seconds between cycles
//   (default 3600, minimum 1)
// - `--ip-url` / `DIGITALOCEAN_IP_URL`: IP echo service
// - `--log-level` / `DYNDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// Missing or invalid configuration terminates the process with exit code 1
// and a message naming the field, before any network activity. Once the
// loop is running, per-cycle errors are logged and the process keeps
// going.
//
// ## Example
//
// ```bash
// export DIGITALOCEAN_TOKEN=your_token
// dyndnsd --domain example.com --name home --interval 300
// ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::{Config, Reconciler, Scheduler};
use dyndns_ip_http::HttpIpResolver;
use dyndns_provider_digitalocean::DigitalOceanProvider;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a DigitalOcean DNS A record pointed at this host's public IP
#[derive(Parser, Debug)]
#[command(name = "dyndnsd", version, about)]
struct Cli {
    /// DigitalOcean API access token
    #[arg(short, long, env = "DIGITALOCEAN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Domain to update
    #[arg(short, long, env = "DIGITALOCEAN_DOMAIN")]
    domain: Option<String>,

    /// Record name to update
    #[arg(short, long, env = "DIGITALOCEAN_NAME")]
    name: Option<String>,

    /// Update interval in seconds (minimum 1)
    #[arg(short, long, env = "DIGITALOCEAN_INTERVAL", default_value_t = 3600)]
    interval: u64,

    /// IP echo service queried for the public address
    #[arg(long, env = "DIGITALOCEAN_IP_URL", default_value = dyndns_ip_http::DEFAULT_IP_SERVICE)]
    ip_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DYNDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Assemble the validated core configuration
    ///
    /// Required values left unset surface as configuration errors naming
    /// the field, matching the validation in dyndns-core.
    fn into_config(self) -> dyndns_core::Result<Config> {
        let config = Config {
            token: self.token.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            record_name: self.name.unwrap_or_default(),
            interval: Duration::from_secs(self.interval),
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("invalid log level '{other}': valid levels are trace, debug, info, warn, error");
            return DaemonExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    let ip_url = cli.ip_url.clone();

    // Validate before any network activity.
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    info!(
        domain = %config.domain,
        name = %config.record_name,
        interval_secs = config.interval.as_secs(),
        "configuration loaded"
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run_daemon(config, ip_url)) {
        Ok(()) => DaemonExitCode::CleanShutdown.into(),
        Err(e) => {
            error!("daemon error: {e}");
            DaemonExitCode::RuntimeError.into()
        }
    }
}

/// Wire the resolver, provider, and reconciler into the tick loop
async fn run_daemon(config: Config, ip_url: String) -> Result<()> {
    let resolver = HttpIpResolver::with_url(ip_url)?;
    let provider = DigitalOceanProvider::new(config.token.clone())?;

    let reconciler = Arc::new(Reconciler::new(Box::new(resolver), Box::new(provider)));
    let scheduler = Scheduler::new(config.interval);

    let domain = config.domain.clone();
    let name = config.record_name.clone();

    info!(domain = %domain, name = %name, "starting reconciliation loop");

    scheduler
        .run({
            let reconciler = Arc::clone(&reconciler);
            move || {
                let reconciler = Arc::clone(&reconciler);
                let domain = domain.clone();
                let name = name.clone();
                async move {
                    if let Err(e) = reconciler.reconcile(&domain, &name).await {
                        error!(error = %e, "reconciliation cycle failed");
                    }
                }
            }
        })
        .await;

    info!("scheduler stopped, shutting down");
    Ok(())
}
