//! Input rows and their normalization rules.
//!
//! A [`RawRow`] is one spreadsheet record exactly as uploaded; every
//! field is optional. [`FulfillmentRow::normalize`] turns it into a
//! canonical row, substituting the configured carrier and tracking-URL
//! defaults where the upload left gaps.

use serde::Deserialize;

use crate::error::RowError;

/// Carrier substituted when a row has no `TrackingCompany`.
pub const DEFAULT_TRACKING_COMPANY: &str = "India Post";

/// URL template used when a row has no `TrackingUrl`. The `{tracking}`
/// token is replaced with the row's tracking number.
pub const DEFAULT_TRACKING_URL_TEMPLATE: &str =
    "https://www.indiapost.gov.in/VAS/Pages/trackconsignment.aspx?tn={tracking}";

/// Token in the tracking-URL template replaced by the tracking number.
pub const TRACKING_TOKEN: &str = "{tracking}";

/// One raw spreadsheet record.
///
/// Field names map to the canonical column headers; column order in the
/// upload is irrelevant because parsing is header-driven.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    /// Platform-formatted order reference, e.g. `#1025`.
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Carrier tracking number.
    #[serde(rename = "TrackingNumber")]
    pub tracking_number: Option<String>,
    /// Carrier name.
    #[serde(rename = "TrackingCompany")]
    pub tracking_company: Option<String>,
    /// Customer-facing tracking URL.
    #[serde(rename = "TrackingUrl")]
    pub tracking_url: Option<String>,
}

impl RawRow {
    /// Order name for report attribution, even when the row is
    /// otherwise unusable. Empty string when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Defaults applied during normalization.
#[derive(Debug, Clone)]
pub struct TrackingDefaults {
    /// Carrier name substituted for a missing `TrackingCompany`.
    pub company: String,
    /// URL template (with `{tracking}` token) substituted for a missing
    /// `TrackingUrl`.
    pub url_template: String,
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            company: DEFAULT_TRACKING_COMPANY.to_string(),
            url_template: DEFAULT_TRACKING_URL_TEMPLATE.to_string(),
        }
    }
}

/// Tracking metadata attached to a fulfillment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingInfo {
    /// Tracking number; may be empty (degenerate but accepted).
    pub number: String,
    /// Carrier name.
    pub company: String,
    /// Customer-facing tracking URL.
    pub url: String,
}

/// One canonical input record, ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentRow {
    /// Platform-formatted order reference, guaranteed non-empty.
    pub order_name: String,
    /// Tracking metadata with defaults applied.
    pub tracking: TrackingInfo,
}

impl FulfillmentRow {
    /// Normalize a raw record.
    ///
    /// * Missing `TrackingCompany` -> `defaults.company`.
    /// * Missing `TrackingUrl` -> `defaults.url_template` with the
    ///   `{tracking}` token substituted. A missing tracking number
    ///   yields an empty token, which is accepted, not rejected.
    /// * Missing or blank `Name` -> [`RowError::MalformedRow`].
    ///
    /// Pure: performs no validation against remote order state.
    pub fn normalize(raw: &RawRow, defaults: &TrackingDefaults) -> Result<Self, RowError> {
        let order_name = non_blank(raw.name.as_deref()).ok_or(RowError::MalformedRow)?;

        let number = non_blank(raw.tracking_number.as_deref()).unwrap_or_default();

        let company =
            non_blank(raw.tracking_company.as_deref()).unwrap_or_else(|| defaults.company.clone());

        let url = non_blank(raw.tracking_url.as_deref())
            .unwrap_or_else(|| defaults.url_template.replace(TRACKING_TOKEN, &number));

        Ok(Self {
            order_name,
            tracking: TrackingInfo {
                number,
                company,
                url,
            },
        })
    }
}

/// Trimmed, non-empty copy of the value, or `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(
        name: Option<&str>,
        number: Option<&str>,
        company: Option<&str>,
        url: Option<&str>,
    ) -> RawRow {
        RawRow {
            name: name.map(String::from),
            tracking_number: number.map(String::from),
            tracking_company: company.map(String::from),
            tracking_url: url.map(String::from),
        }
    }

    #[test]
    fn test_defaults_substituted() {
        let row = FulfillmentRow::normalize(
            &raw(Some("#1025"), Some("RX1"), None, None),
            &TrackingDefaults::default(),
        )
        .unwrap();

        assert_eq!(row.order_name, "#1025");
        assert_eq!(row.tracking.number, "RX1");
        assert_eq!(row.tracking.company, DEFAULT_TRACKING_COMPANY);
        assert!(row.tracking.url.contains("RX1"), "url: {}", row.tracking.url);
    }

    #[test]
    fn test_explicit_values_kept() {
        let row = FulfillmentRow::normalize(
            &raw(
                Some("#1026"),
                Some("AB2"),
                Some("DHL"),
                Some("https://dhl.example/AB2"),
            ),
            &TrackingDefaults::default(),
        )
        .unwrap();

        assert_eq!(row.tracking.company, "DHL");
        assert_eq!(row.tracking.url, "https://dhl.example/AB2");
    }

    #[test]
    fn test_missing_tracking_number_yields_degenerate_url() {
        let row = FulfillmentRow::normalize(
            &raw(Some("#1027"), None, None, None),
            &TrackingDefaults::default(),
        )
        .unwrap();

        assert_eq!(row.tracking.number, "");
        assert!(row.tracking.url.ends_with("tn="), "url: {}", row.tracking.url);
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let err = FulfillmentRow::normalize(
            &raw(None, Some("RX1"), None, None),
            &TrackingDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RowError::MalformedRow));
    }

    #[test]
    fn test_blank_name_is_malformed() {
        let err = FulfillmentRow::normalize(
            &raw(Some("   "), Some("RX1"), None, None),
            &TrackingDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RowError::MalformedRow));
    }

    #[test]
    fn test_custom_template() {
        let defaults = TrackingDefaults {
            company: "FedEx".into(),
            url_template: "https://track.example/{tracking}/status".into(),
        };
        let row =
            FulfillmentRow::normalize(&raw(Some("#1"), Some("Z9"), None, None), &defaults).unwrap();
        assert_eq!(row.tracking.url, "https://track.example/Z9/status");
        assert_eq!(row.tracking.company, "FedEx");
    }
}
