// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sinks for the human-readable progress lines.

use std::sync::{Arc, Mutex};

/// Receives one progress line at a time, in order.
pub trait Reporter: Send + Sync {
	fn line(&self, line: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
	fn line(&self, line: &str) {
		println!("{line}");
	}
}

/// Keeps lines in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
	lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lines(&self) -> Vec<String> {
		self
			.lines
			.lock()
			.map(|lines| lines.clone())
			.unwrap_or_default()
	}

	pub fn contains(&self, line: &str) -> bool {
		self.lines().iter().any(|l| l == line)
	}
}

impl Reporter for MemoryReporter {
	fn line(&self, line: &str) {
		if let Ok(mut lines) = self.lines.lock() {
			lines.push(line.to_string());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_reporter_shares_buffer_between_clones() {
		let reporter = MemoryReporter::new();
		let clone = reporter.clone();
		clone.line("Storage Class: longhorn");
		reporter.line("OKAY");

		assert_eq!(reporter.lines(), vec!["Storage Class: longhorn", "OKAY"]);
		assert!(clone.contains("OKAY"));
	}
}
