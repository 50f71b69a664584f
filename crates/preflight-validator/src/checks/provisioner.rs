// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing::debug;

use super::display_name;
use crate::error::{ValidationError, ValidationResult};
use crate::model::StorageClassInfo;
use crate::report::Reporter;

/// Require at least one storage class whose provisioner contains `needle`.
///
/// Returns the number of matching classes.
pub fn check_provisioner_presence(
	classes: &[StorageClassInfo],
	needle: &str,
	reporter: &dyn Reporter,
) -> ValidationResult<usize> {
	let matching = classes
		.iter()
		.filter(|class| class.provisioner_contains(needle))
		.count();
	let name = display_name(needle);

	if matching > 0 {
		debug!(needle, matching, "provisioner found");
		reporter.line(&format!("{name} support found."));
		Ok(matching)
	} else {
		reporter.line(&format!("{name} support not found."));
		Err(ValidationError::ProvisionerNotFound {
			needle: needle.to_string(),
		})
	}
}
