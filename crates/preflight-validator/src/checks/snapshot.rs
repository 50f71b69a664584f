// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use preflight_config::SnapshotClassPolicy;
use preflight_k8s::ClusterClient;
use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::report::Reporter;

/// Check for volume snapshot classes according to `policy`.
///
/// Under [`SnapshotClassPolicy::Skip`] nothing is queried and `None` is
/// returned; otherwise the number of classes found.
pub async fn check_snapshot_class(
	client: &dyn ClusterClient,
	policy: SnapshotClassPolicy,
	reporter: &dyn Reporter,
) -> ValidationResult<Option<usize>> {
	reporter.line("Checking Volume Snapshot Class...");

	if policy == SnapshotClassPolicy::Skip {
		debug!("snapshot class check skipped by policy");
		return Ok(None);
	}

	let classes = client
		.list_volume_snapshot_classes()
		.await
		.map_err(|e| ValidationError::api("Volume Snapshot Class", e))?;

	for class in &classes {
		let line = match &class.deletion_policy {
			Some(deletion) => format!(
				"Volume Snapshot Class: {} ({}, deletionPolicy {deletion})",
				class.name, class.driver
			),
			None => format!("Volume Snapshot Class: {} ({})", class.name, class.driver),
		};
		reporter.line(&line);
	}

	if classes.is_empty() {
		reporter.line("Volume Snapshot Class not found.");
		return Err(ValidationError::NoSnapshotClass);
	}

	reporter.line("Volume Snapshot Class found.");
	Ok(Some(classes.len()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::MemoryReporter;
	use preflight_k8s::{K8sError, MockClusterClient, SnapshotClass};

	#[tokio::test]
	async fn skip_policy_makes_no_api_call() {
		let client = MockClusterClient::new();
		let reporter = MemoryReporter::new();

		let result = check_snapshot_class(&client, SnapshotClassPolicy::Skip, &reporter)
			.await
			.unwrap();

		assert_eq!(result, None);
		assert_eq!(client.calls(), 0);
		assert_eq!(reporter.lines(), vec!["Checking Volume Snapshot Class..."]);
	}

	#[tokio::test]
	async fn require_policy_lists_classes() {
		let client = MockClusterClient::new()
			.with_snapshot_class(SnapshotClass::new("longhorn-snap", "driver.longhorn.io"));
		let reporter = MemoryReporter::new();

		let result = check_snapshot_class(&client, SnapshotClassPolicy::Require, &reporter)
			.await
			.unwrap();

		assert_eq!(result, Some(1));
		assert!(reporter.contains("Volume Snapshot Class: longhorn-snap (driver.longhorn.io)"));
		assert!(reporter.contains("Volume Snapshot Class found."));
	}

	#[tokio::test]
	async fn deletion_policy_is_reported_when_set() {
		let retained = SnapshotClass {
			deletion_policy: Some("Retain".to_string()),
			..SnapshotClass::new("ceph-snap", "rbd.csi.ceph.com")
		};
		let client = MockClusterClient::new().with_snapshot_class(retained);
		let reporter = MemoryReporter::new();

		check_snapshot_class(&client, SnapshotClassPolicy::Require, &reporter)
			.await
			.unwrap();

		assert!(reporter.contains("Volume Snapshot Class: ceph-snap (rbd.csi.ceph.com, deletionPolicy Retain)"));
	}

	#[tokio::test]
	async fn require_policy_fails_without_classes() {
		let client = MockClusterClient::new();
		let reporter = MemoryReporter::new();

		let err = check_snapshot_class(&client, SnapshotClassPolicy::Require, &reporter)
			.await
			.unwrap_err();

		assert_eq!(err, ValidationError::NoSnapshotClass);
	}

	#[tokio::test]
	async fn require_policy_surfaces_api_errors() {
		let client = MockClusterClient::new();
		client.fail_with(K8sError::ApiError {
			message: "forbidden".to_string(),
		});

		let err = check_snapshot_class(&client, SnapshotClassPolicy::Require, &MemoryReporter::new())
			.await
			.unwrap_err();

		assert!(err.is_transport());
	}
}
