//! Type-dispatched field extraction from a claim's detail page.

use crate::amount::parse_amount;
use crate::claim::{ClaimDetail, ClaimKind};
use crate::driver::UiDriver;
use crate::error::{Error, Result};
use crate::registry::RegistryProfile;

/// Read the type-specific fields from the detail page the session is
/// currently on.
///
/// The caller navigates the session there first; extraction itself never
/// moves the session. Property amounts are normalized to a decimal, holder
/// and interest amounts stay verbatim.
pub async fn extract(
    driver: &dyn UiDriver,
    profile: &RegistryProfile,
    kind: ClaimKind,
) -> Result<ClaimDetail> {
    match kind {
        ClaimKind::PropertyHeldByState => {
            let ids = &profile.property_detail;
            let reporter = driver.element_by_id(&ids.reporter).await?.text().await?;
            let amount_text = driver.element_by_id(&ids.amount).await?.text().await?;
            let property_type = driver
                .element_by_id(&ids.property_type)
                .await?
                .text()
                .await?;
            Ok(ClaimDetail::Property {
                reporter,
                amount: parse_amount(&amount_text)?,
                property_type,
            })
        }
        ClaimKind::NoticeHolder | ClaimKind::UnclaimedInterest => {
            let ids = &profile.holder_detail;
            let reporter = driver.element_by_id(&ids.reporter).await?.text().await?;
            let property_type = driver
                .element_by_id(&ids.property_type)
                .await?
                .text()
                .await?;
            let amount = driver.element_by_id(&ids.amount).await?.text().await?;
            Ok(ClaimDetail::Holder {
                reporter,
                amount,
                property_type,
            })
        }
        ClaimKind::Unknown => Err(Error::UnknownKind),
    }
}
