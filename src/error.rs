// Copyright 2026 Escheat Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types shared across the claim discovery engine.

/// All errors that can abort a discovery run.
///
/// Recoverable registry conditions (overflow, unknown claim types,
/// unparseable property amounts) are handled inside the collector and never
/// surface here, with the exception of [`Error::AmountParse`], which the
/// collector catches per claim.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The browser session failed: launch, navigation, lost connection.
    #[error("browser driver error: {0:#}")]
    Driver(anyhow::Error),

    /// An element the registry always renders was not on the page.
    #[error("registry page is missing {0}")]
    MissingElement(&'static str),

    /// No decimal amount could be extracted from a cash-amount field.
    #[error("no decimal amount in {0:?}")]
    AmountParse(String),

    /// Detail extraction was invoked for an unclassified row.
    #[error("cannot extract details for an unknown claim type")]
    UnknownKind,

    /// The contacts file could not be read.
    #[error("failed to read contacts file: {0}")]
    ContactsIo(#[from] std::io::Error),

    /// The contacts file bytes did not decode as the detected encoding.
    #[error("contacts file is not valid {0}")]
    ContactsDecode(&'static str),

    /// The contacts file rows could not be parsed as CSV.
    #[error("failed to parse contacts file: {0}")]
    ContactsCsv(#[from] csv::Error),
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Driver(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
