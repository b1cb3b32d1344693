// Copyright 2026 Escheat Contributors
// SPDX-License-Identifier: Apache-2.0

//! Claim records and claim-type classification.
//!
//! A claim starts life as a results-table row, gets classified by its type
//! icon, and is completed with the fields read from its detail page.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order in which a contact's names were submitted to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDirection {
    /// Family name in the last-name field, given name in the first-name field.
    Normal,
    /// Names swapped, to catch records the registry stored transposed.
    Reversed,
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::Normal => write!(f, "normal"),
            SearchDirection::Reversed => write!(f, "reversed"),
        }
    }
}

/// Claim category, derived from the type icon on a results row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimKind {
    /// Property already remitted to and held by the state.
    PropertyHeldByState,
    /// Property still with the reporting holder.
    NoticeHolder,
    /// Interest owed on unclaimed funds.
    UnclaimedInterest,
    /// The icon matched none of the known markers.
    Unknown,
}

impl ClaimKind {
    /// Classify a results row by its type icon source.
    ///
    /// Total over any input: unrecognized icons, including an empty `src`,
    /// come back as [`ClaimKind::Unknown`] rather than an error.
    pub fn classify(icon_src: &str) -> ClaimKind {
        if icon_src.contains("pIcon") {
            ClaimKind::PropertyHeldByState
        } else if icon_src.contains("nIcon") {
            ClaimKind::NoticeHolder
        } else if icon_src.contains("iIcon") {
            ClaimKind::UnclaimedInterest
        } else {
            ClaimKind::Unknown
        }
    }
}

/// Type-specific fields read from a claim's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimDetail {
    /// Property held by the state. The cash amount is normalized to an
    /// exact decimal at extraction time.
    Property {
        reporter: String,
        amount: Decimal,
        property_type: String,
    },
    /// Holder-reported and interest records. The amount text is kept
    /// verbatim: the registry does not guarantee a numeric format here.
    Holder {
        reporter: String,
        amount: String,
        property_type: String,
    },
}

/// One fully enriched claim attributable to a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// First address line from the results row.
    pub address1: String,
    /// Second address line from the results row.
    pub address2: String,
    /// Registry's property identifier column, as displayed.
    pub property_id: String,
    /// Icon source the row was classified from.
    pub icon_src: String,
    /// Detail page this claim was enriched from.
    pub detail_url: String,
    pub kind: ClaimKind,
    pub detail: ClaimDetail,
    /// Email of the contact that produced this claim.
    pub email: String,
    /// Direction of the search pass that found it.
    pub direction: SearchDirection,
    /// When the detail fetch completed.
    pub fetched_at: DateTime<Utc>,
}
