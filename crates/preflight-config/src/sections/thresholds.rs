// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Readiness thresholds section.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_MIN_GB: i64 = 500;
pub const DEFAULT_CPU_MIN_CORES: u64 = 24;
pub const DEFAULT_MEMORY_MIN_GB: u64 = 64;
pub const DEFAULT_PROVISIONER: &str = "longhorn";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsConfigLayer {
	pub storage_min_gb: Option<i64>,
	pub cpu_min_cores: Option<u64>,
	pub memory_min_gb: Option<u64>,
	pub provisioner: Option<String>,
}

impl ThresholdsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.storage_min_gb.is_some() {
			self.storage_min_gb = other.storage_min_gb;
		}
		if other.cpu_min_cores.is_some() {
			self.cpu_min_cores = other.cpu_min_cores;
		}
		if other.memory_min_gb.is_some() {
			self.memory_min_gb = other.memory_min_gb;
		}
		if other.provisioner.is_some() {
			self.provisioner = other.provisioner;
		}
	}

	pub fn finalize(self) -> ThresholdsConfig {
		ThresholdsConfig {
			storage_min_gb: self.storage_min_gb.unwrap_or(DEFAULT_STORAGE_MIN_GB),
			cpu_min_cores: self.cpu_min_cores.unwrap_or(DEFAULT_CPU_MIN_CORES),
			memory_min_gb: self.memory_min_gb.unwrap_or(DEFAULT_MEMORY_MIN_GB),
			provisioner: self
				.provisioner
				.unwrap_or_else(|| DEFAULT_PROVISIONER.to_string()),
		}
	}
}

/// Numeric limits a cluster has to meet.
///
/// A storage class's `size` must be strictly greater than `storage_min_gb`;
/// the CPU and memory totals must be at least their minimums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsConfig {
	pub storage_min_gb: i64,
	pub cpu_min_cores: u64,
	pub memory_min_gb: u64,
	/// Case-sensitive substring looked for in storage class provisioners.
	pub provisioner: String,
}

impl Default for ThresholdsConfig {
	fn default() -> Self {
		ThresholdsConfigLayer::default().finalize()
	}
}
