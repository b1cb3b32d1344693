//! Report aggregation and rendering.
//!
//! Folds every contact's claims into one display-name-keyed report, then
//! renders it for a terminal reader. Rendering is the only human-facing
//! output; everything else goes to the log.

use crate::claim::{Claim, ClaimDetail, SearchDirection};
use crate::collect::ClaimCollector;
use crate::contacts::Contact;
use crate::driver::UiDriver;
use crate::error::Result;
use crate::registry::RegistryProfile;
use indexmap::IndexMap;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Discovered claims keyed by person display name, in contact order.
///
/// Two contacts rendering the same display name share one bucket: the
/// aggregation key is the rendered name, not contact identity.
pub type Report = IndexMap<String, Vec<Claim>>;

/// Run both search directions over every contact and fold the results.
///
/// Strictly sequential: one shared session, one operation at a time, in
/// contact order. Normal-direction claims land before reversed ones.
/// Every processed contact gets a bucket even when nothing was found, so
/// the rendered report shows who was searched.
pub async fn aggregate(
    driver: &dyn UiDriver,
    profile: &RegistryProfile,
    contacts: &[Contact],
) -> Result<Report> {
    let collector = ClaimCollector::new(driver, profile);
    let mut report = Report::new();

    for contact in contacts {
        let name = contact.display_name();
        info!("searching the registry for {name}");

        let normal = collector.collect(contact, SearchDirection::Normal).await?;
        let reversed = collector.collect(contact, SearchDirection::Reversed).await?;
        debug!(
            "{name}: {} normal-direction and {} reversed-direction claims",
            normal.len(),
            reversed.len()
        );

        let bucket = report.entry(name).or_default();
        bucket.extend(normal);
        bucket.extend(reversed);
    }

    Ok(report)
}

/// Render the report for a terminal reader.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    for (name, claims) in report {
        let _ = writeln!(out);
        let _ = writeln!(out, "{name} has {} claims to collect:", claims.len());
        for (index, claim) in claims.iter().enumerate() {
            let line = match &claim.detail {
                ClaimDetail::Property {
                    reporter, amount, ..
                } => format!(
                    "${amount} from {reporter} with address {}, {}.",
                    claim.address1, claim.address2
                ),
                ClaimDetail::Holder {
                    reporter,
                    amount,
                    property_type,
                } => format!(
                    "{amount} of {property_type} from {} with address {}, {}.",
                    collapse_whitespace(reporter),
                    claim.address1,
                    claim.address2
                ),
            };
            let _ = writeln!(out, "  {}. {line}", index + 1);
            if claim.direction == SearchDirection::Reversed {
                let _ = writeln!(
                    out,
                    "     Found only with the first and last names reversed!"
                );
            }
        }
    }
    out
}

/// The registry pads holder names with interior whitespace runs.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
