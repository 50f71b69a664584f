// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Check behaviour section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the volume snapshot class check behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotClassPolicy {
	/// Announce the check and pass without querying the cluster.
	#[default]
	Skip,
	/// Require at least one VolumeSnapshotClass.
	Require,
}

impl FromStr for SnapshotClassPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"skip" => Ok(SnapshotClassPolicy::Skip),
			"require" => Ok(SnapshotClassPolicy::Require),
			other => Err(format!("unknown snapshot class policy '{other}' (expected skip or require)")),
		}
	}
}

impl fmt::Display for SnapshotClassPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SnapshotClassPolicy::Skip => write!(f, "skip"),
			SnapshotClassPolicy::Require => write!(f, "require"),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecksConfigLayer {
	pub snapshot_class: Option<SnapshotClassPolicy>,
	pub strict_parsing: Option<bool>,
}

impl ChecksConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.snapshot_class.is_some() {
			self.snapshot_class = other.snapshot_class;
		}
		if other.strict_parsing.is_some() {
			self.strict_parsing = other.strict_parsing;
		}
	}

	pub fn finalize(self) -> ChecksConfig {
		ChecksConfig {
			snapshot_class: self.snapshot_class.unwrap_or_default(),
			strict_parsing: self.strict_parsing.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecksConfig {
	pub snapshot_class: SnapshotClassPolicy,
	/// Fail on unparseable sizes and quantities instead of counting them as zero.
	pub strict_parsing: bool,
}
