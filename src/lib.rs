// Copyright 2026 Escheat Contributors
// SPDX-License-Identifier: Apache-2.0

//! Escheat claim finder library.
//!
//! Drives a state unclaimed-property registry through a headless browser,
//! searching every contact in both name orders and folding the discovered
//! claims into a per-person report.

pub mod amount;
pub mod claim;
pub mod collect;
pub mod contacts;
pub mod detail;
pub mod driver;
pub mod error;
pub mod registry;
pub mod report;
pub mod search;

pub use claim::{Claim, ClaimDetail, ClaimKind, SearchDirection};
pub use contacts::{load_contacts, Contact};
pub use error::{Error, Result};
pub use registry::RegistryProfile;
pub use report::{aggregate, render, Report};
