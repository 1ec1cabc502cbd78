use anyhow::{Context, Result};
use clap::Parser;
use orbit_config::{ConfigLoader, LogFormat, OrbitConfig};
use orbit_monitoring::{init_tracing, TracingConfig};
use orbit_service::cli::{Args, Command};
use orbit_service::{api, OrbitService};
use orbit_types::UserIntent;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let mut loader = ConfigLoader::new();
	if let Some(path) = &args.config {
		loader = loader.with_file(path);
	}
	let config = loader.load().await.context("Failed to load configuration")?;

	let level = args
		.log_level
		.clone()
		.unwrap_or_else(|| config.logging.level.clone());
	init_tracing(
		TracingConfig::new()
			.with_level(level)
			.with_json_format(config.logging.format == LogFormat::Json),
	)?;

	match args.command.unwrap_or(Command::Start) {
		Command::Start => start_service(config).await,
		Command::Validate => validate_config(&config),
		Command::Resolve { text, address } => resolve_once(&config, text, address).await,
	}
}

async fn start_service(config: OrbitConfig) -> Result<()> {
	info!("Starting Orbit intent router ({} mode)", config.server.mode);

	let service =
		Arc::new(OrbitService::from_config(&config).context("Failed to build service")?);

	api::start_http_server(
		service,
		&config.server.host,
		config.server.port,
		shutdown_signal(),
	)
	.await
	.context("HTTP server failed")?;

	info!("Orbit intent router stopped");
	Ok(())
}

fn validate_config(config: &OrbitConfig) -> Result<()> {
	info!("Configuration is valid");
	info!("  Server: {}:{}", config.server.host, config.server.port);
	info!("  Model: {} via {}", config.llm.model, config.llm.base_url);
	info!("  Pricing: {}", config.pricing.provider);
	info!(
		"  Routing: {} bps slippage, fee tier {}, router {}",
		config.routing.slippage_bps, config.routing.fee_tier, config.routing.router_address
	);
	Ok(())
}

async fn resolve_once(config: &OrbitConfig, text: String, address: String) -> Result<()> {
	let service = OrbitService::from_config(config).context("Failed to build service")?;
	let route = service
		.solve(UserIntent::new(text, address))
		.await
		.context("Failed to resolve intent")?;

	println!("{}", serde_json::to_string_pretty(&route)?);
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			error!("Failed to install Ctrl+C handler: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
			},
			Err(e) => {
				error!("Failed to install SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			},
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received");
}
