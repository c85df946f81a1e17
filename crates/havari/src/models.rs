use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

// The search endpoint serializes rows as .NET tuples, so most fields arrive
// under generic names like Item1/Item2. Renamed here to what they hold.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    /// Report headline (`Item1`).
    #[serde(rename = "Item1")]
    pub title: Option<String>,
    /// Vessel classification, e.g. "Fiske-/ fangstfartøy, liten" (`Item2`).
    #[serde(rename = "Item2")]
    pub classification: Option<String>,
    /// Vessel name (`Item4`), may be empty.
    #[serde(rename = "Item4")]
    pub vessel_name: Option<String>,
    /// Report number, e.g. "2024/01".
    #[serde(rename = "Name")]
    pub report_number: Option<String>,
    /// Path fragment of the report page, resolved against the site base URL.
    #[serde(rename = "Url")]
    pub relative_url: Option<String>,
    /// Incident date in .NET JSON date format, e.g. "/Date(1700000000000)/".
    #[serde(rename = "IncidentDate")]
    pub incident_date: Option<String>,
}

impl Report {
    pub fn title(&self) -> &str {
        trimmed(&self.title)
    }

    pub fn classification(&self) -> &str {
        trimmed(&self.classification)
    }

    pub fn vessel_name(&self) -> &str {
        trimmed(&self.vessel_name)
    }

    pub fn report_number(&self) -> &str {
        trimmed(&self.report_number)
    }

    pub fn relative_url(&self) -> &str {
        trimmed(&self.relative_url)
    }

    pub fn incident_date(&self) -> &str {
        trimmed(&self.incident_date)
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or_default()
}

/// One page of the marine report search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "Reports", default)]
    pub reports: Vec<Report>,
}

static DOTNET_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Date\((\d+)\)").unwrap());

/// Parse a .NET JSON date string into a UTC instant.
///
/// The wire format embeds epoch milliseconds between a `Date(` marker and a
/// closing parenthesis. Anything that does not match yields `None` so callers
/// can fall back to the run timestamp.
pub fn parse_dotnet_date(s: &str) -> Option<DateTime<Utc>> {
    let caps = DOTNET_DATE.captures(s)?;
    let millis: i64 = caps[1].parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotnet_date() {
        let dt = parse_dotnet_date("/Date(1700000000000)/").unwrap();
        assert_eq!(dt, DateTime::from_timestamp_millis(1_700_000_000_000).unwrap());
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_parse_dotnet_date_without_slashes() {
        assert!(parse_dotnet_date("Date(1700000000000)").is_some());
    }

    #[test]
    fn test_parse_dotnet_date_invalid() {
        assert!(parse_dotnet_date("not a date").is_none());
        assert!(parse_dotnet_date("").is_none());
        assert!(parse_dotnet_date("Date()").is_none());
    }

    #[test]
    fn test_report_accessors_trim_and_default() {
        let report = Report {
            title: Some("  Grunnstøting  ".to_string()),
            classification: None,
            ..Default::default()
        };
        assert_eq!(report.title(), "Grunnstøting");
        assert_eq!(report.classification(), "");
        assert_eq!(report.vessel_name(), "");
    }

    #[test]
    fn test_decode_search_page() {
        let json = r#"{
            "Reports": [
                {
                    "Item1": "Grunnstøting",
                    "Item2": "Fiske-/ fangstfartøy, liten",
                    "Item4": "Havglans",
                    "Name": "2024/01",
                    "Url": "/Sjoefart/123",
                    "IncidentDate": "/Date(1700000000000)/",
                    "SomethingUnknown": 42
                }
            ],
            "Total": 375
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.reports.len(), 1);
        let report = &page.reports[0];
        assert_eq!(report.title(), "Grunnstøting");
        assert_eq!(report.classification(), "Fiske-/ fangstfartøy, liten");
        assert_eq!(report.report_number(), "2024/01");
    }

    #[test]
    fn test_decode_search_page_without_reports_field() {
        let page: SearchPage = serde_json::from_str("{}").unwrap();
        assert!(page.reports.is_empty());
    }
}
