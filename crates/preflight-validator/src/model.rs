// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Point-in-time views of the cluster objects the checks read.

use std::collections::BTreeMap;

use preflight_k8s::{Node, Quantity, StorageClass};

/// Parameter key holding a storage class's capacity in GB.
pub const SIZE_PARAMETER: &str = "size";

const CPU: &str = "cpu";
const MEMORY: &str = "memory";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageClassInfo {
	pub name: String,
	pub provisioner: String,
	pub parameters: BTreeMap<String, String>,
}

impl StorageClassInfo {
	/// The `size` parameter, if present and non-empty.
	pub fn size_parameter(&self) -> Option<&str> {
		self
			.parameters
			.get(SIZE_PARAMETER)
			.map(String::as_str)
			.filter(|s| !s.is_empty())
	}

	/// Case-sensitive substring match on the provisioner.
	pub fn provisioner_contains(&self, needle: &str) -> bool {
		self.provisioner.contains(needle)
	}
}

impl From<&StorageClass> for StorageClassInfo {
	fn from(class: &StorageClass) -> Self {
		Self {
			name: class.metadata.name.clone().unwrap_or_default(),
			provisioner: class.provisioner.clone(),
			parameters: class.parameters.clone().unwrap_or_default(),
		}
	}
}

/// CPU and memory of one node, as the raw quantity strings the API reported.
///
/// A resource missing from the node status is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeInfo {
	pub name: String,
	pub cpu_capacity: Option<String>,
	pub memory_capacity: Option<String>,
	pub cpu_allocatable: Option<String>,
	pub memory_allocatable: Option<String>,
}

fn resource(map: Option<&BTreeMap<String, Quantity>>, key: &str) -> Option<String> {
	map.and_then(|m| m.get(key)).map(|q| q.0.clone())
}

impl From<&Node> for NodeInfo {
	fn from(node: &Node) -> Self {
		let status = node.status.as_ref();
		let capacity = status.and_then(|s| s.capacity.as_ref());
		let allocatable = status.and_then(|s| s.allocatable.as_ref());
		Self {
			name: node.metadata.name.clone().unwrap_or_default(),
			cpu_capacity: resource(capacity, CPU),
			memory_capacity: resource(capacity, MEMORY),
			cpu_allocatable: resource(allocatable, CPU),
			memory_allocatable: resource(allocatable, MEMORY),
		}
	}
}
