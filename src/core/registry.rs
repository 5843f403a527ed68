use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use super::models::DeckTab;
use crate::persistence::{
    preferences::STORAGE_REGISTRY_KEY,
    store::{
        read_json,
        write_best_effort,
    },
    KeyValueStore,
    StoreRead,
};

/// Tabs the user has successfully opened, per spreadsheet, in discovery order.
/// Entries are never evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckRegistry {
    entries: HashMap<String, Vec<DeckTab>>,
}

impl DeckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> StoreRead<Self> {
        read_json(store, STORAGE_REGISTRY_KEY)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> bool {
        match serde_json::to_string(self) {
            Ok(json) => write_best_effort(store, STORAGE_REGISTRY_KEY, &json),
            Err(e) => {
                log::warn!("Failed to serialize deck registry: {}", e);
                false
            }
        }
    }

    pub fn tabs(&self, spreadsheet_id: &str) -> &[DeckTab] {
        self.entries.get(spreadsheet_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, spreadsheet_id: &str, tab_id: &str) -> Option<&DeckTab> {
        self.tabs(spreadsheet_id).iter().find(|tab| tab.tab_id == tab_id)
    }

    pub fn contains(&self, spreadsheet_id: &str, tab_id: &str) -> bool {
        self.find(spreadsheet_id, tab_id).is_some()
    }

    /// Appends the tab unless it is already known. Returns whether anything changed.
    pub fn register_tab(&mut self, spreadsheet_id: &str, tab_id: &str, display_name: &str) -> bool {
        let tabs = self.entries.entry(spreadsheet_id.to_string()).or_default();
        if tabs.iter().any(|tab| tab.tab_id == tab_id) {
            return false;
        }

        tabs.push(DeckTab::new(tab_id, display_name));
        true
    }

    pub fn spreadsheet_count(&self) -> usize {
        self.entries.len()
    }
}
