use std::time::Duration;

use regex::Regex;
use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use super::{
    config::SourceConfig,
    models::{
        DeckReference,
        DeckTab,
    },
    DeckError,
};

/// Where deck CSV and tab listings come from.
#[allow(async_fn_in_trait)]
pub trait SheetSource {
    async fn fetch_csv(&self, reference: &DeckReference) -> Result<String, DeckError>;

    /// Best-effort: any failure yields an empty list.
    async fn discover_tabs(&self, spreadsheet_id: &str) -> Vec<DeckTab>;
}

pub fn http_client(config: &SourceConfig) -> Result<Client, DeckError> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| DeckError::Custom(format!("HTTP client build failed: {e}")))
}

/// Published Google Sheets, read over the gviz CSV export.
#[derive(Debug, Clone)]
pub struct GoogleSheetSource {
    client: Client,
    config: SourceConfig,
}

impl GoogleSheetSource {
    pub fn new(config: SourceConfig) -> Result<Self, DeckError> {
        Ok(Self { client: http_client(&config)?, config })
    }

    async fn get(&self, url: &str) -> Result<Response, DeckError> {
        let resp = self.client.get(url).header(USER_AGENT, &self.config.user_agent).send().await?;
        ensure_success(&resp)?;
        Ok(resp)
    }

    async fn discover_from(&self, url: &str) -> Result<Vec<DeckTab>, DeckError> {
        let feed: serde_json::Value = self.get(url).await?.json().await?;
        parse_worksheet_feed(&feed)
    }
}

impl SheetSource for GoogleSheetSource {
    async fn fetch_csv(&self, reference: &DeckReference) -> Result<String, DeckError> {
        let url = self.config.csv_url(&reference.spreadsheet_id, &reference.tab_id);
        log::debug!("Fetching deck CSV from {}", url);
        Ok(self.get(&url).await?.text().await?)
    }

    async fn discover_tabs(&self, spreadsheet_id: &str) -> Vec<DeckTab> {
        for url in self.config.discovery_urls(spreadsheet_id) {
            match self.discover_from(&url).await {
                Ok(tabs) if !tabs.is_empty() => return tabs,
                Ok(_) => log::debug!("No tabs listed at {}", url),
                Err(e) => log::debug!("Tab discovery via {} failed: {}", url, e),
            }
        }

        Vec::new()
    }
}

fn ensure_success(resp: &Response) -> Result<(), DeckError> {
    if !resp.status().is_success() {
        log::warn!("HTTP error {} from {}", resp.status(), resp.url());
        return Err(DeckError::HttpStatus(resp.status().as_u16()));
    }
    Ok(())
}

/// Reads `feed.entry[]` from a worksheet feed. Entries without a title or a numeric id suffix
/// are skipped.
pub fn parse_worksheet_feed(feed: &serde_json::Value) -> Result<Vec<DeckTab>, DeckError> {
    let id_re = Regex::new(r"/([0-9]+)$")?;

    let entries = feed
        .pointer("/feed/entry")
        .and_then(|entry| entry.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let name = entry.pointer("/title/$t")?.as_str()?;
            let id_text = entry.pointer("/id/$t")?.as_str()?;
            let gid = id_re.captures(id_text)?.get(1)?.as_str();
            if name.is_empty() {
                return None;
            }
            Some(DeckTab::new(gid, name))
        })
        .collect())
}
