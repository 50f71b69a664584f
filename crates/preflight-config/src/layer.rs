// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	ChecksConfigLayer, ClusterConfigLayer, LoggingConfigLayer, RunConfigLayer, ThresholdsConfigLayer,
};

/// Preflight configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreflightConfigLayer {
	#[serde(default)]
	pub thresholds: Option<ThresholdsConfigLayer>,
	#[serde(default)]
	pub checks: Option<ChecksConfigLayer>,
	#[serde(default)]
	pub cluster: Option<ClusterConfigLayer>,
	#[serde(default)]
	pub run: Option<RunConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl PreflightConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: PreflightConfigLayer) {
		merge_option(
			&mut self.thresholds,
			other.thresholds,
			ThresholdsConfigLayer::merge,
		);
		merge_option(&mut self.checks, other.checks, ChecksConfigLayer::merge);
		merge_option(&mut self.cluster, other.cluster, ClusterConfigLayer::merge);
		merge_option(&mut self.run, other.run, RunConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_empty_layers() {
		let mut base = PreflightConfigLayer::default();
		base.merge(PreflightConfigLayer::default());
		assert!(base.thresholds.is_none());
		assert!(base.checks.is_none());
	}

	#[test]
	fn test_merge_preserves_base_when_other_empty() {
		let mut base = PreflightConfigLayer {
			thresholds: Some(ThresholdsConfigLayer {
				cpu_min_cores: Some(8),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(PreflightConfigLayer::default());
		assert_eq!(base.thresholds.as_ref().unwrap().cpu_min_cores, Some(8));
	}

	#[test]
	fn test_merge_fills_missing_section() {
		let mut base = PreflightConfigLayer::default();
		base.merge(PreflightConfigLayer {
			run: Some(RunConfigLayer {
				exit_pause_secs: Some(0),
			}),
			..Default::default()
		});
		assert_eq!(base.run.unwrap().exit_pause_secs, Some(0));
	}

	#[test]
	fn test_unknown_section_rejected() {
		let result: Result<PreflightConfigLayer, _> = toml::from_str("[http]\nport = 1\n");
		assert!(result.is_err());
	}
}
