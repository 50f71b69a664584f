// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use preflight_k8s::K8sError;
use thiserror::Error;

/// Result type alias for validation runs.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a readiness run stops.
///
/// `Api` is a transport failure; every other variant is a cluster that did
/// not meet a requirement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Failed to get {listing}: {source}")]
	Api {
		listing: &'static str,
		#[source]
		source: K8sError,
	},

	#[error(
		"Insufficient storage: storage class {class} has size {size_gb}GB, more than {minimum_gb}GB required"
	)]
	InsufficientStorage {
		class: String,
		size_gb: i64,
		minimum_gb: i64,
	},

	#[error("Provisioner support not found: no storage class provisioner contains '{needle}'")]
	ProvisionerNotFound { needle: String },

	#[error("No VolumeSnapshotClass found")]
	NoSnapshotClass,

	#[error("Insufficient CPU resources: {total} cores, at least {minimum} required")]
	InsufficientCpu { total: u64, minimum: u64 },

	#[error("Insufficient memory resources: {total_gb}GB, at least {minimum_gb}GB required")]
	InsufficientMemory { total_gb: u64, minimum_gb: u64 },

	#[error("Invalid {field} '{value}': {reason}")]
	InvalidQuantity {
		field: String,
		value: String,
		reason: String,
	},
}

impl ValidationError {
	pub fn api(listing: &'static str, source: K8sError) -> Self {
		ValidationError::Api { listing, source }
	}

	/// Whether the run failed to talk to the cluster rather than on a check.
	pub fn is_transport(&self) -> bool {
		matches!(self, ValidationError::Api { .. })
	}
}
