// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! K8s client abstraction for preflight cluster readiness checks.
//!
//! This crate provides:
//! - A trait-based client abstraction over the read-only queries the checks issue
//! - Production implementation using the kube crate
//! - An in-memory mock serving fixed cluster snapshots

mod client;
mod error;
mod kube_client;
mod mock;
mod types;

pub use client::ClusterClient;
pub use error::{K8sError, K8sResult};
pub use kube_client::KubeClient;
pub use mock::MockClusterClient;
pub use types::{
	Node, NodeStatus, ObjectMeta, Quantity, SnapshotClass, StorageClass, SNAPSHOT_CLASS_KIND,
	SNAPSHOT_CLASS_PLURAL, SNAPSHOT_GROUP, SNAPSHOT_VERSION,
};
