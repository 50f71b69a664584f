// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use preflight_config::ThresholdsConfig;
use tracing::{debug, warn};

use super::ParsePolicy;
use crate::error::{ValidationError, ValidationResult};
use crate::model::NodeInfo;
use crate::quantity::parse_quantity;
use crate::report::Reporter;

/// Cluster-wide totals computed from node capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterResources {
	pub nodes: usize,
	pub total_cpu_cores: u64,
	/// Sum of each node's whole GiB, not the GiB of the summed bytes.
	pub total_memory_gb: u64,
}

/// Negative totals count as zero. Totals beyond `u64` are treated like any
/// other unusable quantity under `policy`.
fn whole_units(
	value: i128,
	field: &str,
	raw: &str,
	node: &str,
	policy: ParsePolicy,
) -> ValidationResult<u64> {
	if value < 0 {
		warn!(field, node, value = %value, "negative capacity counted as zero");
		return Ok(0);
	}
	policy.resolve(u64::try_from(value), field, raw, node)
}

/// Sum whole CPU cores and whole GiB of memory over all nodes.
///
/// Fractional cores are truncated per node (`1500m` is one core). Missing
/// resources count as zero.
pub fn sum_cluster_resources(
	nodes: &[NodeInfo],
	policy: ParsePolicy,
) -> ValidationResult<ClusterResources> {
	let mut totals = ClusterResources {
		nodes: nodes.len(),
		..Default::default()
	};

	for node in nodes {
		let cores = match node.cpu_capacity.as_deref() {
			Some(raw) => {
				let whole = policy.resolve(
					parse_quantity(raw).map(|q| q.whole()),
					"cpu capacity",
					raw,
					&node.name,
				)?;
				whole_units(whole, "cpu capacity", raw, &node.name, policy)?
			}
			None => 0,
		};
		let memory_gb = match node.memory_capacity.as_deref() {
			Some(raw) => {
				let whole = policy.resolve(
					parse_quantity(raw).map(|q| q.whole_gib()),
					"memory capacity",
					raw,
					&node.name,
				)?;
				whole_units(whole, "memory capacity", raw, &node.name, policy)?
			}
			None => 0,
		};

		debug!(
			node = %node.name,
			cores,
			memory_gb,
			cpu_allocatable = node.cpu_allocatable.as_deref().unwrap_or("-"),
			memory_allocatable = node.memory_allocatable.as_deref().unwrap_or("-"),
			"node capacity"
		);

		totals.total_cpu_cores = totals.total_cpu_cores.saturating_add(cores);
		totals.total_memory_gb = totals.total_memory_gb.saturating_add(memory_gb);
	}

	Ok(totals)
}

/// Require the CPU total, then the memory total, to meet their minimums.
pub fn check_cluster_resources(
	nodes: &[NodeInfo],
	thresholds: &ThresholdsConfig,
	policy: ParsePolicy,
	reporter: &dyn Reporter,
) -> ValidationResult<ClusterResources> {
	let totals = sum_cluster_resources(nodes, policy)?;
	debug!(
		nodes = totals.nodes,
		total_cpu_cores = totals.total_cpu_cores,
		total_memory_gb = totals.total_memory_gb,
		"cluster resources summed"
	);

	let cpu_min = thresholds.cpu_min_cores;
	if totals.total_cpu_cores >= cpu_min {
		reporter.line(&format!("Sufficient CPU: More than {cpu_min} cores."));
	} else {
		reporter.line("Insufficient CPU resources.");
		return Err(ValidationError::InsufficientCpu {
			total: totals.total_cpu_cores,
			minimum: cpu_min,
		});
	}

	let memory_min = thresholds.memory_min_gb;
	if totals.total_memory_gb >= memory_min {
		reporter.line(&format!("Sufficient memory: More than {memory_min} GB."));
	} else {
		reporter.line("Insufficient memory resources.");
		return Err(ValidationError::InsufficientMemory {
			total_gb: totals.total_memory_gb,
			minimum_gb: memory_min,
		});
	}

	Ok(totals)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::MemoryReporter;
	use proptest::prelude::*;

	fn node(name: &str, cpu: &str, memory: &str) -> NodeInfo {
		NodeInfo {
			name: name.to_string(),
			cpu_capacity: Some(cpu.to_string()),
			memory_capacity: Some(memory.to_string()),
			..Default::default()
		}
	}

	#[test]
	fn three_eight_core_nodes_pass() {
		let nodes = vec![
			node("a", "8", "24Gi"),
			node("b", "8", "24Gi"),
			node("c", "8", "24Gi"),
		];
		let reporter = MemoryReporter::new();
		let totals = check_cluster_resources(
			&nodes,
			&ThresholdsConfig::default(),
			ParsePolicy::Lenient,
			&reporter,
		)
		.unwrap();

		assert_eq!(totals.total_cpu_cores, 24);
		assert_eq!(totals.total_memory_gb, 72);
		assert_eq!(
			reporter.lines(),
			vec![
				"Sufficient CPU: More than 24 cores.",
				"Sufficient memory: More than 64 GB.",
			]
		);
	}

	#[test]
	fn cpu_failure_skips_memory() {
		let nodes = vec![node("a", "4", "8Gi"), node("b", "4", "8Gi")];
		let reporter = MemoryReporter::new();
		let err = check_cluster_resources(
			&nodes,
			&ThresholdsConfig::default(),
			ParsePolicy::Lenient,
			&reporter,
		)
		.unwrap_err();

		assert_eq!(
			err,
			ValidationError::InsufficientCpu {
				total: 8,
				minimum: 24
			}
		);
		assert_eq!(reporter.lines(), vec!["Insufficient CPU resources."]);
	}

	#[test]
	fn memory_failure_after_cpu_passes() {
		let nodes = vec![node("a", "32", "16Gi")];
		let reporter = MemoryReporter::new();
		let err = check_cluster_resources(
			&nodes,
			&ThresholdsConfig::default(),
			ParsePolicy::Lenient,
			&reporter,
		)
		.unwrap_err();

		assert_eq!(
			err,
			ValidationError::InsufficientMemory {
				total_gb: 16,
				minimum_gb: 64
			}
		);
		assert_eq!(
			reporter.lines(),
			vec![
				"Sufficient CPU: More than 24 cores.",
				"Insufficient memory resources.",
			]
		);
	}

	#[test]
	fn memory_is_floored_per_node() {
		// 1.5Gi twice is 3GiB of bytes but only 2 whole GiB node by node.
		let nodes = vec![node("a", "1", "1536Mi"), node("b", "1", "1536Mi")];
		let totals = sum_cluster_resources(&nodes, ParsePolicy::Lenient).unwrap();
		assert_eq!(totals.total_memory_gb, 2);
	}

	#[test]
	fn fractional_cpu_truncates_per_node() {
		let nodes = vec![node("a", "1500m", "1Gi"), node("b", "500m", "1Gi")];
		let totals = sum_cluster_resources(&nodes, ParsePolicy::Lenient).unwrap();
		assert_eq!(totals.total_cpu_cores, 1);
	}

	#[test]
	fn missing_resources_count_as_zero() {
		let nodes = vec![NodeInfo {
			name: "bare".to_string(),
			..Default::default()
		}];
		let totals = sum_cluster_resources(&nodes, ParsePolicy::Strict).unwrap();
		assert_eq!(totals.total_cpu_cores, 0);
		assert_eq!(totals.total_memory_gb, 0);
	}

	#[test]
	fn garbage_quantity_depends_on_policy() {
		let nodes = vec![node("a", "lots", "8Gi")];

		let totals = sum_cluster_resources(&nodes, ParsePolicy::Lenient).unwrap();
		assert_eq!(totals.total_cpu_cores, 0);
		assert_eq!(totals.total_memory_gb, 8);

		let err = sum_cluster_resources(&nodes, ParsePolicy::Strict).unwrap_err();
		assert!(matches!(err, ValidationError::InvalidQuantity { .. }));
	}

	#[test]
	fn capacity_beyond_u64_depends_on_policy() {
		let nodes = vec![node("huge", "1e20", "8Gi")];

		let totals = sum_cluster_resources(&nodes, ParsePolicy::Lenient).unwrap();
		assert_eq!(totals.total_cpu_cores, 0);
		assert_eq!(totals.total_memory_gb, 8);

		let err = sum_cluster_resources(&nodes, ParsePolicy::Strict).unwrap_err();
		match err {
			ValidationError::InvalidQuantity { field, value, .. } => {
				assert_eq!(field, "cpu capacity of huge");
				assert_eq!(value, "1e20");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn negative_capacity_counts_as_zero_even_when_strict() {
		let nodes = vec![node("odd", "-4", "8Gi")];
		let totals = sum_cluster_resources(&nodes, ParsePolicy::Strict).unwrap();
		assert_eq!(totals.total_cpu_cores, 0);
	}

	#[test]
	fn empty_cluster_fails_cpu() {
		let err = check_cluster_resources(
			&[],
			&ThresholdsConfig::default(),
			ParsePolicy::Lenient,
			&MemoryReporter::new(),
		)
		.unwrap_err();
		assert!(matches!(err, ValidationError::InsufficientCpu { total: 0, .. }));
	}

	proptest! {
		#[test]
		fn totals_are_sums_of_per_node_values(
			specs in prop::collection::vec((0u64..256, 0u64..(1 << 40)), 0..16)
		) {
			let nodes: Vec<_> = specs
				.iter()
				.enumerate()
				.map(|(i, (cpu, bytes))| node(&format!("n{i}"), &cpu.to_string(), &bytes.to_string()))
				.collect();
			let totals = sum_cluster_resources(&nodes, ParsePolicy::Lenient).unwrap();

			let cpu: u64 = specs.iter().map(|(c, _)| c).sum();
			let memory: u64 = specs.iter().map(|(_, b)| b >> 30).sum();
			prop_assert_eq!(totals.total_cpu_cores, cpu);
			prop_assert_eq!(totals.total_memory_gb, memory);
		}
	}
}
