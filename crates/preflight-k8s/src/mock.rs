// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory cluster client for exercising the checks without a real cluster.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::ClusterClient;
use crate::error::{K8sError, K8sResult};
use crate::types::{Node, NodeStatus, ObjectMeta, Quantity, SnapshotClass, StorageClass};

/// A mock K8s client serving a fixed cluster snapshot.
///
/// Every list call is counted so tests can assert how many round trips a
/// validation run made. A configured failure is returned by every call.
#[derive(Debug, Clone, Default)]
pub struct MockClusterClient {
	storage_classes: Arc<Mutex<Vec<StorageClass>>>,
	nodes: Arc<Mutex<Vec<Node>>>,
	snapshot_classes: Arc<Mutex<Vec<SnapshotClass>>>,
	failure: Arc<Mutex<Option<K8sError>>>,
	calls: Arc<AtomicUsize>,
}

impl MockClusterClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_storage_class(self, class: StorageClass) -> Self {
		self.storage_classes.lock().unwrap().push(class);
		self
	}

	pub fn with_node(self, node: Node) -> Self {
		self.nodes.lock().unwrap().push(node);
		self
	}

	pub fn with_snapshot_class(self, class: SnapshotClass) -> Self {
		self.snapshot_classes.lock().unwrap().push(class);
		self
	}

	/// Make every subsequent list call fail with `err`.
	pub fn fail_with(&self, err: K8sError) {
		*self.failure.lock().unwrap() = Some(err);
	}

	/// Number of list calls served so far.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Build a storage class with the given provisioner and parameters.
	pub fn storage_class(name: &str, provisioner: &str, parameters: &[(&str, &str)]) -> StorageClass {
		let parameters: BTreeMap<String, String> = parameters
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		StorageClass {
			metadata: ObjectMeta {
				name: Some(name.to_string()),
				..Default::default()
			},
			provisioner: provisioner.to_string(),
			parameters: if parameters.is_empty() {
				None
			} else {
				Some(parameters)
			},
			..Default::default()
		}
	}

	/// Build a node whose capacity and allocatable are both `cpu`/`memory`.
	pub fn node(name: &str, cpu: &str, memory: &str) -> Node {
		let resources: BTreeMap<String, Quantity> = [
			("cpu".to_string(), Quantity(cpu.to_string())),
			("memory".to_string(), Quantity(memory.to_string())),
		]
		.into_iter()
		.collect();
		Node {
			metadata: ObjectMeta {
				name: Some(name.to_string()),
				..Default::default()
			},
			status: Some(NodeStatus {
				capacity: Some(resources.clone()),
				allocatable: Some(resources),
				..Default::default()
			}),
			..Default::default()
		}
	}

	fn begin_call(&self) -> Result<(), K8sError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self.failure.lock().unwrap().clone() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl ClusterClient for MockClusterClient {
	async fn list_storage_classes(&self) -> K8sResult<Vec<StorageClass>> {
		self.begin_call()?;
		Ok(self.storage_classes.lock().unwrap().clone())
	}

	async fn list_nodes(&self) -> K8sResult<Vec<Node>> {
		self.begin_call()?;
		Ok(self.nodes.lock().unwrap().clone())
	}

	async fn list_volume_snapshot_classes(&self) -> K8sResult<Vec<SnapshotClass>> {
		self.begin_call()?;
		Ok(self.snapshot_classes.lock().unwrap().clone())
	}
}
