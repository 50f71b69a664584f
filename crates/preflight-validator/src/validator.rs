// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runs the readiness checks in order against one cluster.

use std::sync::Arc;

use preflight_config::{PreflightConfig, SnapshotClassPolicy, ThresholdsConfig};
use preflight_k8s::ClusterClient;
use tracing::{info, instrument, warn};

use crate::checks::{
	check_cluster_resources, check_provisioner_presence, check_snapshot_class,
	check_storage_capacity, ClusterResources, ParsePolicy, StorageCapacity,
};
use crate::error::{ValidationError, ValidationResult};
use crate::model::{NodeInfo, StorageClassInfo};
use crate::report::Reporter;

/// Line printed when every check passed.
pub const SUCCESS_LINE: &str = "OKAY";

/// Everything the validator needs besides the cluster handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorSettings {
	pub thresholds: ThresholdsConfig,
	pub snapshot_class: SnapshotClassPolicy,
	pub parse_policy: ParsePolicy,
}

impl From<&PreflightConfig> for ValidatorSettings {
	fn from(config: &PreflightConfig) -> Self {
		Self {
			thresholds: config.thresholds.clone(),
			snapshot_class: config.checks.snapshot_class,
			parse_policy: ParsePolicy::from_strict(config.checks.strict_parsing),
		}
	}
}

/// What a passing run observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
	pub storage: StorageCapacity,
	pub provisioner_classes: usize,
	/// `None` when the snapshot class check was skipped.
	pub snapshot_classes: Option<usize>,
	pub resources: ClusterResources,
}

/// Outcome of a whole run, mapped onto the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
	Success,
	Failure(String),
}

impl ExitStatus {
	pub fn code(&self) -> i32 {
		match self {
			ExitStatus::Success => 0,
			ExitStatus::Failure(_) => 1,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, ExitStatus::Success)
	}
}

impl From<&ValidationResult<ValidationSummary>> for ExitStatus {
	fn from(result: &ValidationResult<ValidationSummary>) -> Self {
		match result {
			Ok(_) => ExitStatus::Success,
			Err(e) => ExitStatus::Failure(e.to_string()),
		}
	}
}

/// Cluster validator: storage capacity, provisioner presence, snapshot
/// class, then aggregate node resources. The first failure ends the run.
pub struct Validator {
	client: Arc<dyn ClusterClient>,
	settings: ValidatorSettings,
	reporter: Arc<dyn Reporter>,
}

impl Validator {
	pub fn new(
		client: Arc<dyn ClusterClient>,
		settings: ValidatorSettings,
		reporter: Arc<dyn Reporter>,
	) -> Self {
		Self {
			client,
			settings,
			reporter,
		}
	}

	pub fn settings(&self) -> &ValidatorSettings {
		&self.settings
	}

	/// Run all checks, report the outcome and map it to an exit status.
	pub async fn run(&self) -> ExitStatus {
		let result = self.validate().await;
		match &result {
			Ok(summary) => {
				info!(
					storage_classes = summary.storage.classes,
					nodes = summary.resources.nodes,
					total_cpu_cores = summary.resources.total_cpu_cores,
					total_memory_gb = summary.resources.total_memory_gb,
					"cluster passed all readiness checks"
				);
				self.reporter.line(SUCCESS_LINE);
			}
			Err(e) => {
				warn!(error = %e, transport = e.is_transport(), "cluster readiness check failed");
				self.reporter.line(&format!("Error: {e}"));
			}
		}
		ExitStatus::from(&result)
	}

	/// Run all checks in order, stopping at the first failure.
	///
	/// The storage class listing is fetched once and shared by the capacity
	/// and provisioner checks.
	#[instrument(skip(self))]
	pub async fn validate(&self) -> ValidationResult<ValidationSummary> {
		let reporter = self.reporter.as_ref();
		let thresholds = &self.settings.thresholds;

		let classes = self.storage_classes().await?;
		let storage =
			check_storage_capacity(&classes, thresholds, self.settings.parse_policy, reporter)?;
		let provisioner_classes =
			check_provisioner_presence(&classes, &thresholds.provisioner, reporter)?;

		let snapshot_classes =
			check_snapshot_class(self.client.as_ref(), self.settings.snapshot_class, reporter).await?;

		let nodes = self.nodes().await?;
		let resources =
			check_cluster_resources(&nodes, thresholds, self.settings.parse_policy, reporter)?;

		Ok(ValidationSummary {
			storage,
			provisioner_classes,
			snapshot_classes,
			resources,
		})
	}

	async fn storage_classes(&self) -> ValidationResult<Vec<StorageClassInfo>> {
		let classes = self
			.client
			.list_storage_classes()
			.await
			.map_err(|e| ValidationError::api("Storage Class", e))?;
		Ok(classes.iter().map(StorageClassInfo::from).collect())
	}

	async fn nodes(&self) -> ValidationResult<Vec<NodeInfo>> {
		let nodes = self
			.client
			.list_nodes()
			.await
			.map_err(|e| ValidationError::api("nodes", e))?;
		Ok(nodes.iter().map(NodeInfo::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exit_codes() {
		assert_eq!(ExitStatus::Success.code(), 0);
		assert_eq!(ExitStatus::Failure("no".to_string()).code(), 1);
		assert!(ExitStatus::Success.is_success());
	}

	#[test]
	fn settings_from_config() {
		let mut config = PreflightConfig::default();
		config.checks.strict_parsing = true;
		config.checks.snapshot_class = SnapshotClassPolicy::Require;

		let settings = ValidatorSettings::from(&config);
		assert_eq!(settings.parse_policy, ParsePolicy::Strict);
		assert_eq!(settings.snapshot_class, SnapshotClassPolicy::Require);
		assert_eq!(settings.thresholds.cpu_min_cores, 24);
	}

	#[test]
	fn exit_status_carries_error_message() {
		let result: ValidationResult<ValidationSummary> = Err(ValidationError::NoSnapshotClass);
		assert_eq!(
			ExitStatus::from(&result),
			ExitStatus::Failure("No VolumeSnapshotClass found".to_string())
		);
	}
}
