// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML file, environment variables and CLI flags.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::PreflightConfigLayer;
use crate::sections::logging::parse_log_format;
use crate::sections::{
	ChecksConfigLayer, ClusterConfigLayer, LogFormat, LoggingConfigLayer, RunConfigLayer,
	SnapshotClassPolicy, ThresholdsConfigLayer,
};

/// Default location of the config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/preflight/preflight.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Cli = 100,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<PreflightConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<PreflightConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(PreflightConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
	required: bool,
}

impl TomlSource {
	/// A config file that is skipped when absent.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// A config file the user asked for explicitly; absence is an error.
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<PreflightConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(PreflightConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: PreflightConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: PREFLIGHT_<FIELD>
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Read from the process environment.
	pub fn process() -> Self {
		Self { vars: None }
	}

	/// Read from a fixed set of variables instead of the process environment.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parse<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: std::str::FromStr,
		T::Err: std::fmt::Display,
	{
		match self.var(name) {
			Some(v) => v
				.trim()
				.parse()
				.map(Some)
				.map_err(|e: T::Err| ConfigError::InvalidValue {
					key: name.to_string(),
					message: format!("invalid value '{v}': {e}"),
				}),
			None => Ok(None),
		}
	}

	fn load_thresholds(&self) -> Result<ThresholdsConfigLayer, ConfigError> {
		Ok(ThresholdsConfigLayer {
			storage_min_gb: self.parse("PREFLIGHT_STORAGE_MIN_GB")?,
			cpu_min_cores: self.parse("PREFLIGHT_CPU_MIN_CORES")?,
			memory_min_gb: self.parse("PREFLIGHT_MEMORY_MIN_GB")?,
			provisioner: self.var("PREFLIGHT_PROVISIONER"),
		})
	}

	fn load_checks(&self) -> Result<ChecksConfigLayer, ConfigError> {
		Ok(ChecksConfigLayer {
			snapshot_class: self.parse::<SnapshotClassPolicy>("PREFLIGHT_SNAPSHOT_CLASS")?,
			strict_parsing: self.bool("PREFLIGHT_STRICT_PARSING"),
		})
	}

	fn load_logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		let format = match self.var("PREFLIGHT_LOG_FORMAT") {
			Some(v) => Some(parse_log_format(&v).ok_or_else(|| ConfigError::InvalidValue {
				key: "PREFLIGHT_LOG_FORMAT".to_string(),
				message: format!("invalid value '{v}': expected pretty or json"),
			})?),
			None => None,
		};
		Ok(LoggingConfigLayer {
			level: self.var("PREFLIGHT_LOG_LEVEL"),
			format,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<PreflightConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(PreflightConfigLayer {
			thresholds: Some(self.load_thresholds()?),
			checks: Some(self.load_checks()?),
			cluster: Some(ClusterConfigLayer {
				in_cluster: self.bool("PREFLIGHT_IN_CLUSTER"),
			}),
			run: Some(RunConfigLayer {
				exit_pause_secs: self.parse("PREFLIGHT_EXIT_PAUSE_SECS")?,
			}),
			logging: Some(self.load_logging()?),
		})
	}
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<LogFormat>,
	pub in_cluster: Option<bool>,
	pub exit_pause_secs: Option<u64>,
}

/// Source for CLI overrides; highest precedence.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<PreflightConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = PreflightConfigLayer::default();

		if self.overrides.log_level.is_some() || self.overrides.log_format.is_some() {
			layer.logging = Some(LoggingConfigLayer {
				level: self.overrides.log_level.clone(),
				format: self.overrides.log_format,
			});
		}

		if let Some(in_cluster) = self.overrides.in_cluster {
			layer.cluster = Some(ClusterConfigLayer {
				in_cluster: Some(in_cluster),
			});
		}

		if let Some(secs) = self.overrides.exit_pause_secs {
			layer.run = Some(RunConfigLayer {
				exit_pause_secs: Some(secs),
			});
		}

		Ok(layer)
	}
}
