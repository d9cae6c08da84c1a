use clap::Parser;
use splitdns_application::ports::KeyValueStore;
use splitdns_domain::CliOverrides;
use splitdns_infrastructure::store::SnapshotWriter;
use splitdns_jobs::{ClassificationUpdateJob, JobRunner, StoreSweepJob};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "splitdns")]
#[command(version)]
#[command(about = "Split-horizon DNS proxy with ad-blocking and policy routing")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Management server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Store snapshot path
    #[arg(long)]
    snapshot: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        snapshot_path: cli.snapshot.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting SplitDNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;
    let shutdown = CancellationToken::new();

    let snapshot_writer = SnapshotWriter::new(services.store.clone())
        .with_cancellation(shutdown.clone())
        .start();

    let dns_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.dns_port).parse()?;
    let dns_task =
        server::start_dns_server(dns_addr, services.dispatcher.clone(), shutdown.clone()).await?;

    let mut jobs = JobRunner::new().with_store_sweep(
        StoreSweepJob::new(services.store.clone())
            .with_interval(config.store.sweep_interval_secs)
            .with_cancellation(shutdown.clone()),
    );
    match (&config.updater.url, config.updater.daily_time()) {
        (Some(url), Some(daily_at)) => {
            jobs = jobs.with_classification_update(
                ClassificationUpdateJob::new(services.run_update.clone(), url.clone())
                    .with_daily_at(daily_at)
                    .with_cancellation(shutdown.clone()),
            );
        }
        _ => info!("No classification list URL configured, daily update disabled"),
    }
    let job_handles = jobs.start();

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;
    let web_task = server::start_web_server(
        web_addr,
        services.app_state.clone(),
        config.web.content_root.clone(),
        shutdown.clone(),
    )
    .await?;

    info!("SplitDNS ready, press Ctrl+C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown requested");
    shutdown.cancel();

    if let Err(e) = dns_task.await {
        error!(error = %e, "DNS server task failed");
    }
    for handle in job_handles {
        let _ = handle.await;
    }
    let _ = web_task.await;
    let _ = snapshot_writer.await;

    let store = services.store.clone();
    match tokio::task::spawn_blocking(move || store.persist()).await {
        Ok(Ok(())) => info!(entries = services.store.len(), "Store flushed"),
        Ok(Err(e)) => error!(error = %e, "Failed to flush store on shutdown"),
        Err(e) => error!(error = %e, "Shutdown flush task failed"),
    }

    info!("SplitDNS stopped");
    Ok(())
}
