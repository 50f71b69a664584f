// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cluster readiness checks.
//!
//! A [`Validator`] reads storage classes, volume snapshot classes and nodes
//! through a [`preflight_k8s::ClusterClient`] and fails on the first unmet
//! requirement:
//!
//! 1. every sized storage class exceeds the storage minimum
//! 2. some storage class uses the required provisioner
//! 3. a volume snapshot class exists (when required)
//! 4. node capacity adds up to the CPU and memory minimums

pub mod checks;
pub mod error;
pub mod model;
pub mod quantity;
pub mod report;
pub mod validator;

pub use checks::{ClusterResources, ParsePolicy, StorageCapacity};
pub use error::{ValidationError, ValidationResult};
pub use model::{NodeInfo, StorageClassInfo};
pub use quantity::{parse_quantity, ParsedQuantity, QuantityError};
pub use report::{MemoryReporter, Reporter, StdoutReporter};
pub use validator::{ExitStatus, ValidationSummary, Validator, ValidatorSettings, SUCCESS_LINE};
