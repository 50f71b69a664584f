// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process run section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunConfigLayer {
	pub exit_pause_secs: Option<u64>,
}

impl RunConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.exit_pause_secs.is_some() {
			self.exit_pause_secs = other.exit_pause_secs;
		}
	}

	pub fn finalize(self) -> RunConfig {
		RunConfig {
			exit_pause_secs: self.exit_pause_secs.unwrap_or(2),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
	/// Pause after printing `OKAY`, so the container's last line is collected
	/// before it stops.
	pub exit_pause_secs: u64,
}

impl RunConfig {
	pub fn exit_pause(&self) -> Duration {
		Duration::from_secs(self.exit_pause_secs)
	}
}

impl Default for RunConfig {
	fn default() -> Self {
		Self { exit_pause_secs: 2 }
	}
}
