//! One search submission against the registry's form.
//!
//! The session owns the protocol quirks of the registry UI: residual form
//! state that must be cleared, newline-triggered submission, the overflow
//! sentinel, and capturing every row before anything navigates away.

use crate::driver::UiDriver;
use crate::error::{Error, Result};
use crate::registry::RegistryProfile;
use anyhow::Context as _;
use url::Url;

/// Cells the registry renders per enumerable results row.
const EXPECTED_CELLS: usize = 5;

/// One captured results-table row.
///
/// Owned strings: the row set must be fully materialized before any detail
/// navigation, because leaving the results page destroys the table.
#[derive(Debug, Clone)]
pub struct RawResultRow {
    pub address1: String,
    pub address2: String,
    pub property_id: String,
    pub icon_src: String,
    pub detail_url: Url,
}

/// What one submitted search produced.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Enumerable result rows in table order. Never empty.
    Rows(Vec<RawResultRow>),
    /// The registry refused to enumerate the result set.
    Overflow,
    /// No result rows rendered.
    Empty,
}

/// Drives one search submission through the shared session.
pub struct SearchSession<'a> {
    driver: &'a dyn UiDriver,
    profile: &'a RegistryProfile,
}

impl<'a> SearchSession<'a> {
    pub fn new(driver: &'a dyn UiDriver, profile: &'a RegistryProfile) -> Self {
        SearchSession { driver, profile }
    }

    /// Submit one (last, first) name pair and capture the outcome.
    ///
    /// The caller orders the pair for its direction; the session does not
    /// know which pass it is running.
    pub async fn search(&self, last_name: &str, first_name: &str) -> Result<SearchOutcome> {
        let page_url = self.driver.goto(&self.profile.search_url).await?;

        let last_input = self
            .driver
            .element_by_id(&self.profile.last_name_input)
            .await?;
        let first_input = self
            .driver
            .element_by_id(&self.profile.first_name_input)
            .await?;

        // The registry repopulates the form from client-side state, so
        // text from the previous search survives navigation.
        last_input.clear().await?;
        first_input.clear().await?;

        last_input.send_keys(last_name).await?;
        // The trailing newline submits; the form has no search button. The
        // claim links are relative to wherever the postback lands, which
        // need not be the form URL.
        let results_url = first_input
            .send_keys(&format!("{first_name}\n"))
            .await?
            .unwrap_or(page_url);

        let rows = self
            .driver
            .elements_by_css(&self.profile.results_row_selector)
            .await?;

        // A single-cell final row is the registry's too-many-results
        // sentinel, rendered in place of enumerable rows.
        if let Some(last_row) = rows.last() {
            if last_row.find_all("td").await?.len() == 1 {
                return Ok(SearchOutcome::Overflow);
            }
        }

        let base = Url::parse(&results_url)
            .with_context(|| format!("registry URL {results_url} is not parseable"))?;

        let mut captured = Vec::new();
        for row in &rows {
            let cells = row.find_all("td").await?;
            if cells.len() != EXPECTED_CELLS {
                continue;
            }

            let anchors = cells[3].find_all("a").await?;
            let link = anchors
                .first()
                .ok_or(Error::MissingElement("the claim link in a results row"))?;
            let href = link
                .attribute("href")
                .await?
                .ok_or(Error::MissingElement("an href on the claim link"))?;
            let detail_url = base
                .join(&href)
                .with_context(|| format!("claim link {href} did not resolve"))?;

            let images = cells[4].find_all("img").await?;
            let icon = images
                .first()
                .ok_or(Error::MissingElement("the type icon in a results row"))?;
            let icon_src = icon.attribute("src").await?.unwrap_or_default();

            captured.push(RawResultRow {
                address1: cells[1].text().await?,
                address2: cells[2].text().await?,
                property_id: cells[3].text().await?,
                icon_src,
                detail_url,
            });
        }

        if captured.is_empty() {
            Ok(SearchOutcome::Empty)
        } else {
            Ok(SearchOutcome::Rows(captured))
        }
    }
}
