// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! preflight - cluster readiness checker
//!
//! Lists storage classes, snapshot classes and nodes from the cluster it runs
//! in and exits non-zero unless storage, provisioner and capacity
//! requirements are met.

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use preflight_config::{load_config, CliOverrides, LogFormat, PreflightConfig};
use preflight_k8s::{ClusterClient, KubeClient};
use preflight_validator::{ExitStatus, StdoutReporter, Validator, ValidatorSettings};

/// Check that a K8s cluster is ready for installation
#[derive(Parser, Debug)]
#[command(name = "preflight", version, about, long_about = None)]
struct Args {
	/// Path to configuration file (default: /etc/preflight/preflight.toml if present)
	#[arg(short, long, env = "PREFLIGHT_CONFIG")]
	config: Option<PathBuf>,

	/// Log level or filter directive (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	/// Fall back to KUBECONFIG / ~/.kube/config when not running in a pod
	#[arg(long)]
	kubeconfig_fallback: bool,

	/// Exit immediately after printing OKAY
	#[arg(long)]
	no_pause: bool,
}

impl Args {
	fn overrides(&self) -> CliOverrides {
		CliOverrides {
			config_file: self.config.clone(),
			log_level: self.log_level.clone(),
			log_format: self.json_logs.then_some(LogFormat::Json),
			in_cluster: self.kubeconfig_fallback.then_some(false),
			exit_pause_secs: self.no_pause.then_some(0),
		}
	}
}

async fn connect(config: &PreflightConfig) -> Result<Arc<dyn ClusterClient>> {
	let client = if config.cluster.in_cluster {
		KubeClient::in_cluster().await
	} else {
		KubeClient::discover().await
	};
	let client = client.context("Failed to connect to Kubernetes cluster")?;
	Ok(Arc::new(client))
}

/// Hold the process open for `pause` after a successful run so the final
/// `OKAY` is visible in pod logs. Failures return immediately.
async fn finish(status: &ExitStatus, pause: Duration) {
	if status.is_success() && !pause.is_zero() {
		debug!(?pause, "pausing before exit");
		tokio::time::sleep(pause).await;
	}
}

async fn run(args: Args) -> Result<ExitStatus> {
	let config = load_config(args.overrides()).context("Failed to load configuration")?;
	logging::init(&config.logging);
	debug!(?config, "resolved configuration");

	let client = connect(&config).await?;
	let validator = Validator::new(
		client,
		ValidatorSettings::from(&config),
		Arc::new(StdoutReporter),
	);

	let status = validator.run().await;
	finish(&status, config.run.exit_pause()).await;

	info!(code = status.code(), "preflight finished");
	Ok(status)
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();

	match run(args).await {
		Ok(status) => ExitCode::from(u8::try_from(status.code()).unwrap_or(1)),
		Err(e) => {
			println!("Error: {e:#}");
			ExitCode::FAILURE
		}
	}
}
