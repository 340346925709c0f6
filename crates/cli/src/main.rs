use anyhow::Context;
use clap::Parser;
use ferrous_respfilter_application::ports::QueryHandler;
use ferrous_respfilter_domain::CliOverrides;
use ferrous_respfilter_infrastructure::dns::{
    DnsServerHandler, ResponseFilterEngine, ResponseFilterHandler, UpstreamForwarder,
};
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-respfilter")]
#[command(version)]
#[command(about = "Ferrous Response Filter - DNS forwarder that refuses answers in blocked networks")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate configuration and rules, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    let rules = bootstrap::load_rules(&config)?;

    if cli.check {
        println!("Configuration OK: {} response filter rule(s)", rules.len());
        return Ok(());
    }

    bootstrap::init_logging(&config.logging);

    info!(
        "Starting Ferrous Response Filter v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(rules = rules.len(), "Response filter rules loaded");

    let upstreams = config
        .upstream
        .socket_addrs()
        .context("invalid upstream servers")?;
    info!(upstreams = ?upstreams, "Upstream servers configured");

    let forwarder: Arc<dyn QueryHandler> = Arc::new(UpstreamForwarder::new(
        upstreams,
        config.upstream.query_timeout(),
    ));
    let engine = Arc::new(ResponseFilterEngine::new(rules));
    let chain: Arc<dyn QueryHandler> =
        Arc::new(ResponseFilterHandler::new(forwarder, engine.clone()));
    let dns_handler = DnsServerHandler::new(chain);

    let dns_addr = config.server.listen_address();
    let workers = config.server.workers;
    let tcp_enabled = config.server.tcp_enabled;

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_handler, workers, tcp_enabled) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    let stats = engine.stats();
    info!(
        inspected = stats.inspected,
        blocked = stats.blocked,
        "Server shutdown complete"
    );
    Ok(())
}
