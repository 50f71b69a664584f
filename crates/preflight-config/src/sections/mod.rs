// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for preflight.

pub mod checks;
pub mod cluster;
pub mod logging;
pub mod run;
pub mod thresholds;

pub use checks::{ChecksConfig, ChecksConfigLayer, SnapshotClassPolicy};
pub use cluster::{ClusterConfig, ClusterConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use run::{RunConfig, RunConfigLayer};
pub use thresholds::{ThresholdsConfig, ThresholdsConfigLayer};
