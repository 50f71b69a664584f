// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use preflight_config::ThresholdsConfig;
use tracing::{debug, warn};

use super::{display_name, ParsePolicy};
use crate::error::{ValidationError, ValidationResult};
use crate::model::StorageClassInfo;
use crate::report::Reporter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageCapacity {
	pub classes: usize,
	/// Classes carrying a `size` parameter, all of which passed.
	pub sized_classes: usize,
}

/// Report every storage class and require each sized one to exceed the
/// storage minimum.
///
/// Classes without a `size` parameter are reported but not evaluated, so an
/// empty listing passes.
pub fn check_storage_capacity(
	classes: &[StorageClassInfo],
	thresholds: &ThresholdsConfig,
	policy: ParsePolicy,
	reporter: &dyn Reporter,
) -> ValidationResult<StorageCapacity> {
	if classes.is_empty() {
		warn!("no storage classes found, storage capacity check passes vacuously");
	}

	let provisioner = display_name(&thresholds.provisioner);
	let minimum_gb = thresholds.storage_min_gb;
	let mut sized_classes = 0;

	for class in classes {
		reporter.line(&format!("Storage Class: {}", class.name));
		if class.provisioner_contains(&thresholds.provisioner) {
			reporter.line(&format!("{provisioner} is being used."));
		}

		let Some(raw) = class.size_parameter() else {
			debug!(class = %class.name, "no size parameter, capacity not evaluated");
			continue;
		};

		let size_gb = policy.resolve(raw.parse::<i64>(), "storage size", raw, &class.name)?;
		if size_gb > minimum_gb {
			debug!(class = %class.name, size_gb, "storage class has sufficient capacity");
			reporter.line(&format!("More than {minimum_gb}GB of storage available."));
			sized_classes += 1;
		} else {
			reporter.line("Insufficient storage.");
			return Err(ValidationError::InsufficientStorage {
				class: class.name.clone(),
				size_gb,
				minimum_gb,
			});
		}
	}

	Ok(StorageCapacity {
		classes: classes.len(),
		sized_classes,
	})
}
