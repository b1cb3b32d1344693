//! Registry profile: where the search form lives and which page elements
//! carry the data.

/// Element ids of the three fields on a claim detail page.
#[derive(Debug, Clone)]
pub struct DetailIds {
    pub reporter: String,
    pub property_type: String,
    pub amount: String,
}

/// Location and element geography of one unclaimed-property registry.
#[derive(Debug, Clone)]
pub struct RegistryProfile {
    /// Search form entry point.
    pub search_url: String,
    /// Element id of the last-name input.
    pub last_name_input: String,
    /// Element id of the first-name input.
    pub first_name_input: String,
    /// CSS selector matching every row of the results table.
    pub results_row_selector: String,
    /// Detail field ids for property-held-by-state claims.
    pub property_detail: DetailIds,
    /// Detail field ids for notice-holder and interest claims.
    pub holder_detail: DetailIds,
}

impl Default for RegistryProfile {
    /// The California State Controller's unclaimed property search.
    fn default() -> Self {
        RegistryProfile {
            search_url: "https://ucpi.sco.ca.gov/ucp/Default.aspx".to_string(),
            last_name_input: "ctl00_ContentPlaceHolder1_txtLastName".to_string(),
            first_name_input: "ctl00_ContentPlaceHolder1_txtFirstName".to_string(),
            results_row_selector: "#ctl00_ContentPlaceHolder1_gvResults tr".to_string(),
            // Only the cash-amount label carries the full ASP.NET container
            // prefix; the other detail labels have bare ids.
            property_detail: DetailIds {
                reporter: "ReportedByData".to_string(),
                property_type: "PropertyTypeData".to_string(),
                amount: "ctl00_ContentPlaceHolder1_CashReportData".to_string(),
            },
            holder_detail: DetailIds {
                reporter: "HolderNameData".to_string(),
                property_type: "PropertyTypeData".to_string(),
                amount: "AmountData".to_string(),
            },
        }
    }
}
