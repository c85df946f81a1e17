use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use havari::{parse_dotnet_date, Report, BASE_URL};
use sha2::{Digest, Sha256};
use url::Url;

/// Link used when a row carries no report URL of its own.
const FALLBACK_LINK: &str = "https://havarikommisjonen.no/Sjoefart/Avgitte-rapporter";

static BASE: LazyLock<Url> = LazyLock::new(|| Url::parse(BASE_URL).expect("base URL is valid"));

/// One rendered RSS item, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    /// RFC 2822 formatted publish date.
    pub pub_date: String,
    pub description: String,
}

/// Render a report row into a feed item.
///
/// Pure in `(report, now)`: `now` is the run-start timestamp used as the
/// publish date for rows without a parseable incident date, so all fallback
/// dates within one run are identical. Missing fields degrade to empty
/// strings or the fallback link rather than failing.
pub fn render(report: &Report, now: DateTime<Utc>) -> FeedItem {
    let link = resolve_link(report.relative_url());
    let report_number = report.report_number();

    let pub_date = parse_dotnet_date(report.incident_date())
        .unwrap_or(now)
        .to_rfc2822();

    let mut description = format!("Type fartøy: {}", report.classification());
    let vessel_name = report.vessel_name();
    if !vessel_name.is_empty() {
        description.push_str(" | Fartøy: ");
        description.push_str(vessel_name);
    }
    if !report_number.is_empty() {
        description.push_str(" | Rapport: ");
        description.push_str(report_number);
    }

    FeedItem {
        title: report.title().to_string(),
        guid: guid_for(&link, report_number),
        link,
        pub_date,
        description,
    }
}

/// Resolve a report's relative URL against the site base. Absolute URLs pass
/// through unchanged; empty or unjoinable fragments fall back to the report
/// listing page.
fn resolve_link(relative_url: &str) -> String {
    if relative_url.is_empty() {
        return FALLBACK_LINK.to_string();
    }
    match BASE.join(relative_url) {
        Ok(url) => url.to_string(),
        Err(_) => FALLBACK_LINK.to_string(),
    }
}

/// Stable item identifier: hex SHA-256 of `link + "|" + report_number`.
///
/// Feed readers use this to recognize previously seen items across runs, so
/// it must depend only on the link and report number.
pub fn guid_for(link: &str, report_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(link.as_bytes());
    hasher.update(b"|");
    hasher.update(report_number.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fishing_row() -> Report {
        Report {
            title: Some("Grunnstøting".to_string()),
            classification: Some("Fiske-/ fangstfartøy".to_string()),
            vessel_name: Some("Havglans".to_string()),
            report_number: Some("2024/01".to_string()),
            relative_url: Some("/Sjoefart/123".to_string()),
            incident_date: Some("/Date(1700000000000)/".to_string()),
        }
    }

    #[test]
    fn test_render_full_row() {
        let now = Utc::now();
        let item = render(&fishing_row(), now);

        assert_eq!(item.title, "Grunnstøting");
        assert_eq!(item.link, "https://havarikommisjonen.no/Sjoefart/123");
        assert_eq!(
            item.description,
            "Type fartøy: Fiske-/ fangstfartøy | Fartøy: Havglans | Rapport: 2024/01"
        );
        let expected = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(item.pub_date, expected.to_rfc2822());
    }

    #[test]
    fn test_render_sparse_row_uses_fallbacks() {
        let now = Utc::now();
        let report = Report {
            classification: Some("Fiske-/ fangstfartøy".to_string()),
            ..Default::default()
        };

        let item = render(&report, now);

        assert_eq!(item.link, FALLBACK_LINK);
        assert_eq!(item.pub_date, now.to_rfc2822());
        assert_eq!(item.description, "Type fartøy: Fiske-/ fangstfartøy");
    }

    #[test]
    fn test_render_is_idempotent_within_a_run() {
        let now = Utc::now();
        let report = fishing_row();
        assert_eq!(render(&report, now), render(&report, now));
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("/Sjoefart/123"),
            "https://havarikommisjonen.no/Sjoefart/123"
        );
        assert_eq!(resolve_link(""), FALLBACK_LINK);
        // Absolute URLs pass through untouched.
        assert_eq!(
            resolve_link("https://example.com/report"),
            "https://example.com/report"
        );
    }

    #[test]
    fn test_guid_is_deterministic() {
        let a = guid_for("https://havarikommisjonen.no/r/1", "2024/01");
        let b = guid_for("https://havarikommisjonen.no/r/1", "2024/01");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_guid_changes_with_either_component() {
        let base = guid_for("https://havarikommisjonen.no/r/1", "2024/01");
        assert_ne!(base, guid_for("https://havarikommisjonen.no/r/2", "2024/01"));
        assert_ne!(base, guid_for("https://havarikommisjonen.no/r/1", "2024/02"));
    }
}
