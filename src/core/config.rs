use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::{
    load_json_or_default,
    save_json,
};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// `{id}` and `{gid}` are substituted.
    pub csv_url_template: String,
    /// Tried in order; `{id}` is substituted.
    pub discovery_url_templates: Vec<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url_template:
                "https://docs.google.com/spreadsheets/d/{id}/gviz/tq?tqx=out:csv&gid={gid}"
                    .to_string(),
            discovery_url_templates: vec![
                "https://spreadsheets.google.com/feeds/worksheets/{id}/public/basic?alt=json"
                    .to_string(),
                "https://spreadsheets.google.com/feeds/worksheets/{id}/public/full?alt=json"
                    .to_string(),
            ],
            request_timeout_secs: 30,
            user_agent: concat!("sheetcards/", env!("CARGO_PKG_VERSION"), " (+reqwest)")
                .to_string(),
        }
    }
}

impl SourceConfig {
    /// Reads `config.json` from the app data dir, writing the defaults out on first run.
    pub fn load_or_create() -> Self {
        if crate::persistence::get_data_file_path(CONFIG_FILE).exists() {
            return load_json_or_default(CONFIG_FILE);
        }

        let config = Self::default();
        if let Err(e) = save_json(&config, CONFIG_FILE) {
            log::warn!("Failed to write default {}: {}", CONFIG_FILE, e);
        }
        config
    }

    pub fn csv_url(&self, spreadsheet_id: &str, tab_id: &str) -> String {
        self.csv_url_template.replace("{id}", spreadsheet_id).replace("{gid}", tab_id)
    }

    pub fn discovery_urls(&self, spreadsheet_id: &str) -> Vec<String> {
        self.discovery_url_templates
            .iter()
            .map(|template| template.replace("{id}", spreadsheet_id))
            .collect()
    }
}
