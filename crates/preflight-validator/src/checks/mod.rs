// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The four readiness checks, in the order the validator runs them.

mod provisioner;
mod resources;
mod snapshot;
mod storage;

pub use provisioner::check_provisioner_presence;
pub use resources::{check_cluster_resources, sum_cluster_resources, ClusterResources};
pub use snapshot::check_snapshot_class;
pub use storage::{check_storage_capacity, StorageCapacity};

use std::fmt::Display;

use tracing::warn;

use crate::error::{ValidationError, ValidationResult};

/// What to do with a size or quantity that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
	/// Count it as zero and log a warning.
	#[default]
	Lenient,
	/// Fail the run with [`ValidationError::InvalidQuantity`].
	Strict,
}

impl ParsePolicy {
	pub fn from_strict(strict: bool) -> Self {
		if strict {
			ParsePolicy::Strict
		} else {
			ParsePolicy::Lenient
		}
	}

	pub(crate) fn resolve<T, E>(
		self,
		parsed: Result<T, E>,
		field: &str,
		value: &str,
		subject: &str,
	) -> ValidationResult<T>
	where
		T: Default,
		E: Display,
	{
		match parsed {
			Ok(v) => Ok(v),
			Err(e) => match self {
				ParsePolicy::Lenient => {
					warn!(field, value, subject, error = %e, "unparseable value counted as zero");
					Ok(T::default())
				}
				ParsePolicy::Strict => Err(ValidationError::InvalidQuantity {
					field: format!("{field} of {subject}"),
					value: value.to_string(),
					reason: e.to_string(),
				}),
			},
		}
	}
}

/// `"longhorn"` -> `"Longhorn"`, for progress lines.
pub(crate) fn display_name(needle: &str) -> String {
	let mut chars = needle.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
