//! Per-contact, per-direction claim collection.
//!
//! One collect call runs the whole pipeline for one pass: search, classify
//! every captured row, then visit detail pages one at a time to finish the
//! claims.

use crate::claim::{Claim, ClaimKind, SearchDirection};
use crate::contacts::Contact;
use crate::detail;
use crate::driver::UiDriver;
use crate::error::{Error, Result};
use crate::registry::RegistryProfile;
use crate::search::{SearchOutcome, SearchSession};
use chrono::Utc;
use tracing::warn;

/// Orchestrates one full pass for one contact and direction.
pub struct ClaimCollector<'a> {
    driver: &'a dyn UiDriver,
    profile: &'a RegistryProfile,
}

impl<'a> ClaimCollector<'a> {
    pub fn new(driver: &'a dyn UiDriver, profile: &'a RegistryProfile) -> Self {
        ClaimCollector { driver, profile }
    }

    /// Collect every claim one search pass produces for this contact.
    ///
    /// Recoverable registry conditions (overflow, unknown row types,
    /// unparseable property amounts) drop the affected rows with a warning
    /// and never abort the pass. Substrate failures propagate.
    pub async fn collect(
        &self,
        contact: &Contact,
        direction: SearchDirection,
    ) -> Result<Vec<Claim>> {
        // The registry rejects a search with an empty last-name box, so
        // the name bound for that slot must be present.
        let (last_name, first_name) = match direction {
            SearchDirection::Normal => {
                if contact.family_name.is_empty() {
                    return Ok(Vec::new());
                }
                (contact.family_name.as_str(), contact.given_name.as_str())
            }
            SearchDirection::Reversed => {
                if contact.given_name.is_empty() {
                    return Ok(Vec::new());
                }
                (contact.given_name.as_str(), contact.family_name.as_str())
            }
        };

        let session = SearchSession::new(self.driver, self.profile);
        let rows = match session.search(last_name, first_name).await? {
            SearchOutcome::Empty => return Ok(Vec::new()),
            SearchOutcome::Overflow => {
                warn!(
                    "too many results for {} {} ({direction} direction), skipping",
                    contact.given_name, contact.family_name
                );
                return Ok(Vec::new());
            }
            SearchOutcome::Rows(rows) => rows,
        };

        // Every row is already captured, so the session is free to leave
        // the results page.
        let mut claims = Vec::with_capacity(rows.len());
        for row in rows {
            let kind = ClaimKind::classify(&row.icon_src);
            if kind == ClaimKind::Unknown {
                warn!(
                    "unrecognized claim type icon {:?} for {} {} ({direction} direction), dropping row",
                    row.icon_src, contact.given_name, contact.family_name
                );
                continue;
            }

            self.driver.goto(row.detail_url.as_str()).await?;
            let detail = match detail::extract(self.driver, self.profile, kind).await {
                Ok(detail) => detail,
                Err(Error::AmountParse(text)) => {
                    warn!(
                        "unparseable cash amount {text:?} on claim {}, dropping it",
                        row.property_id
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            claims.push(Claim {
                address1: row.address1,
                address2: row.address2,
                property_id: row.property_id,
                icon_src: row.icon_src,
                detail_url: row.detail_url.to_string(),
                kind,
                detail,
                email: contact.email.clone(),
                direction,
                fetched_at: Utc::now(),
            });
        }

        Ok(claims)
    }
}
