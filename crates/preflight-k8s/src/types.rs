// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

pub use k8s_openapi::api::core::v1::{Node, NodeStatus};
pub use k8s_openapi::api::storage::v1::StorageClass;
pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// API group of the CSI snapshot CRDs.
pub const SNAPSHOT_GROUP: &str = "snapshot.storage.k8s.io";
/// Served version of `VolumeSnapshotClass`.
pub const SNAPSHOT_VERSION: &str = "v1";
pub const SNAPSHOT_CLASS_KIND: &str = "VolumeSnapshotClass";
pub const SNAPSHOT_CLASS_PLURAL: &str = "volumesnapshotclasses";

/// A `VolumeSnapshotClass` reduced to the fields the checks report on.
///
/// The snapshot CRDs are not part of k8s-openapi, so the kube client reads
/// them as dynamic objects and projects them into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotClass {
	pub name: String,
	pub driver: String,
	pub deletion_policy: Option<String>,
}

impl SnapshotClass {
	pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			driver: driver.into(),
			deletion_policy: None,
		}
	}
}
