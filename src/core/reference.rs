use regex::Regex;
use reqwest::Url;

use super::{
    models::{
        DeckReference,
        DEFAULT_TAB_ID,
    },
    DeckError,
};

const SPREADSHEET_PATH_PATTERN: &str = r"/spreadsheets/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)";
const FRAGMENT_GID_PATTERN: &str = r"(?:^|[&#?])gid=(\d+)";

/// A sheet URL broken into its parts, before the tab default is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub spreadsheet_id: String,
    pub tab_id: Option<String>,
}

impl ResolvedUrl {
    pub fn into_reference(self) -> DeckReference {
        DeckReference {
            spreadsheet_id: self.spreadsheet_id,
            tab_id: self.tab_id.unwrap_or_else(|| DEFAULT_TAB_ID.to_string()),
        }
    }
}

pub fn resolve_reference(raw_url: &str) -> Result<DeckReference, DeckError> {
    resolve_parts(raw_url).map(ResolvedUrl::into_reference)
}

pub fn resolve_parts(raw_url: &str) -> Result<ResolvedUrl, DeckError> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err(DeckError::InvalidReference("empty URL".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| DeckError::InvalidReference(format!("{}: {}", trimmed, e)))?;

    let path_re = Regex::new(SPREADSHEET_PATH_PATTERN)?;
    let spreadsheet_id = path_re
        .captures(url.path())
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            DeckError::InvalidReference(format!("{} is not a spreadsheet URL", trimmed))
        })?;

    let tab_id = match query_gid(&url) {
        Some(gid) => Some(gid),
        None => fragment_gid(&url)?,
    };

    Ok(ResolvedUrl { spreadsheet_id, tab_id })
}

fn query_gid(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "gid")
        .map(|(_, value)| value.into_owned())
        .filter(|value| is_tab_id(value))
}

fn fragment_gid(url: &Url) -> Result<Option<String>, DeckError> {
    let Some(fragment) = url.fragment() else {
        return Ok(None);
    };

    let gid_re = Regex::new(FRAGMENT_GID_PATTERN)?;
    Ok(gid_re
        .captures(fragment)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string()))
}

fn is_tab_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
