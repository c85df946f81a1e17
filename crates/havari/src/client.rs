use async_trait::async_trait;
use reqwest::Client;

use crate::models::{Report, SearchPage};
use crate::HavariError;

pub const BASE_URL: &str = "https://havarikommisjonen.no";
const SEARCH_PATH: &str = "/partials/SearchAdvanced/MarineSimpleSearch";
pub(crate) const USER_AGENT: &str = "sirkel-vs.no RSS builder";

/// Source of search result pages.
///
/// Abstracts a single page fetch so the pagination loop in
/// [`fetch_all_reports`] can run against a stub in tests.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch one page of search results. Pages are numbered from 1.
    async fn fetch_page(&self, page: u32) -> crate::Result<SearchPage>;
}

pub struct HavariClient {
    client: Client,
    base_url: String,
}

impl HavariClient {
    /// Create a client against the production endpoint.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReportSource for HavariClient {
    async fn fetch_page(&self, page: u32) -> crate::Result<SearchPage> {
        let url = format!(
            "{}{}?sortby=name&sortorder=desc&page={}&lcid=1044",
            self.base_url, SEARCH_PATH, page
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(HavariError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| HavariError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

/// Fetch every page of the marine report search, starting at page 1, until
/// the endpoint returns an empty `Reports` array. The response carries a
/// total-count field but it is not trusted; emptiness is the only
/// termination condition. The first failed request aborts the whole fetch.
pub async fn fetch_all_reports<S: ReportSource>(source: &S) -> crate::Result<Vec<Report>> {
    let mut all_rows = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = source.fetch_page(page).await?;
        if batch.reports.is_empty() {
            break;
        }

        tracing::info!("Fetched page {} ({} rows)", page, batch.reports.len());
        all_rows.extend(batch.reports);
        page += 1;
    }

    Ok(all_rows)
}
