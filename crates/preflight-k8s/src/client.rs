// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::K8sResult;
use crate::types::{Node, SnapshotClass, StorageClass};

/// Trait for the read-only K8s queries issued by the readiness checks.
///
/// This abstraction allows the validator to run against fake cluster
/// snapshots in tests.
#[async_trait]
pub trait ClusterClient: Send + Sync {
	/// List all (cluster-scoped) storage classes.
	async fn list_storage_classes(&self) -> K8sResult<Vec<StorageClass>>;

	/// List all nodes in the cluster.
	async fn list_nodes(&self) -> K8sResult<Vec<Node>>;

	/// List all volume snapshot classes.
	///
	/// Clusters without the snapshot CRDs installed yield an empty list
	/// rather than an error.
	async fn list_volume_snapshot_classes(&self) -> K8sResult<Vec<SnapshotClass>>;
}
