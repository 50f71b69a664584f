// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for preflight.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment, CLI)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PREFLIGHT_*`)
//!
//! # Usage
//!
//! ```ignore
//! use preflight_config::{load_config, CliOverrides};
//!
//! let config = load_config(CliOverrides::default())?;
//! println!("need {} cores", config.thresholds.cpu_min_cores);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::PreflightConfigLayer;
pub use sections::*;
pub use sources::{
	CliOverrides, CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
	SYSTEM_CONFIG_PATH,
};

use tracing::{debug, info};

/// Fully resolved preflight configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflightConfig {
	pub thresholds: ThresholdsConfig,
	pub checks: ChecksConfig,
	pub cluster: ClusterConfig,
	pub run: RunConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. CLI flags
/// 2. Environment variables (`PREFLIGHT_*`)
/// 3. Config file (`--config`, else `/etc/preflight/preflight.toml`)
/// 4. Built-in defaults
pub fn load_config(overrides: CliOverrides) -> Result<PreflightConfig, ConfigError> {
	let toml = match &overrides.config_file {
		Some(path) => TomlSource::required(path),
		None => TomlSource::system(),
	};

	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(toml),
		Box::new(EnvSource::process()),
		Box::new(CliSource::new(overrides)),
	];

	load_config_from_sources(sources)
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_config_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<PreflightConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = PreflightConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: PreflightConfigLayer) -> Result<PreflightConfig, ConfigError> {
	let thresholds = layer.thresholds.unwrap_or_default().finalize();
	let checks = layer.checks.unwrap_or_default().finalize();
	let cluster = layer.cluster.unwrap_or_default().finalize();
	let run = layer.run.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&thresholds)?;

	info!(
		storage_min_gb = thresholds.storage_min_gb,
		cpu_min_cores = thresholds.cpu_min_cores,
		memory_min_gb = thresholds.memory_min_gb,
		provisioner = %thresholds.provisioner,
		snapshot_class = %checks.snapshot_class,
		strict_parsing = checks.strict_parsing,
		in_cluster = cluster.in_cluster,
		"Preflight configuration loaded"
	);

	Ok(PreflightConfig {
		thresholds,
		checks,
		cluster,
		run,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(thresholds: &ThresholdsConfig) -> Result<(), ConfigError> {
	if thresholds.provisioner.trim().is_empty() {
		return Err(ConfigError::Validation(
			"thresholds.provisioner must not be empty; an empty needle matches every storage class"
				.to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_defaults_only() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
		let config = load_config_from_sources(sources).unwrap();
		assert_eq!(config, PreflightConfig::default());
		assert_eq!(config.thresholds.storage_min_gb, 500);
		assert_eq!(config.run.exit_pause_secs, 2);
		assert!(config.cluster.in_cluster);
	}

	#[test]
	fn test_empty_provisioner_rejected() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(EnvSource::from_vars([(
			"PREFLIGHT_PROVISIONER",
			"   ",
		)]))];
		let result = load_config_from_sources(sources);
		let err = result.unwrap_err();
		assert!(err.to_string().contains("must not be empty"));
	}

	#[test]
	fn test_cli_overrides_env() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(CliSource::new(CliOverrides {
				exit_pause_secs: Some(0),
				log_format: Some(LogFormat::Json),
				..Default::default()
			})),
			Box::new(EnvSource::from_vars([
				("PREFLIGHT_EXIT_PAUSE_SECS", "30"),
				("PREFLIGHT_LOG_LEVEL", "debug"),
			])),
			Box::new(DefaultsSource),
		];
		let config = load_config_from_sources(sources).unwrap();

		assert_eq!(config.run.exit_pause_secs, 0);
		assert_eq!(config.logging.format, LogFormat::Json);
		assert_eq!(config.logging.level, "debug");
	}

	proptest! {
		#[test]
		fn env_threshold_always_wins_over_file(file_cores in 0u64..1024, env_cores in 0u64..1024) {
			use std::io::Write;

			let mut file = tempfile::NamedTempFile::new().unwrap();
			writeln!(file, "[thresholds]\ncpu_min_cores = {file_cores}").unwrap();

			let sources: Vec<Box<dyn ConfigSource>> = vec![
				Box::new(EnvSource::from_vars([("PREFLIGHT_CPU_MIN_CORES", env_cores.to_string())])),
				Box::new(TomlSource::new(file.path())),
				Box::new(DefaultsSource),
			];
			let config = load_config_from_sources(sources).unwrap();

			prop_assert_eq!(config.thresholds.cpu_min_cores, env_cores);
		}
	}
}
