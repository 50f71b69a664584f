// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cluster connection section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfigLayer {
	pub in_cluster: Option<bool>,
}

impl ClusterConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.in_cluster.is_some() {
			self.in_cluster = other.in_cluster;
		}
	}

	pub fn finalize(self) -> ClusterConfig {
		ClusterConfig {
			in_cluster: self.in_cluster.unwrap_or(true),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
	/// Only use the pod's service account. When false, fall back to
	/// `KUBECONFIG` and `~/.kube/config`.
	pub in_cluster: bool,
}

impl Default for ClusterConfig {
	fn default() -> Self {
		Self { in_cluster: true }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_to_in_cluster() {
		assert!(ClusterConfigLayer::default().finalize().in_cluster);
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = ClusterConfigLayer {
			in_cluster: Some(true),
		};
		base.merge(ClusterConfigLayer {
			in_cluster: Some(false),
		});
		assert!(!base.finalize().in_cluster);
	}
}
