use super::{
    columns::infer_cards,
    csv::parse_rows,
    http::SheetSource,
    models::{
        fallback_deck,
        Card,
        DeckReference,
        DeckTab,
        DEFAULT_TAB_ID,
    },
    naming::{
        ordinal_deck_name,
        suggest_deck_name,
    },
    reference::resolve_parts,
    registry::DeckRegistry,
    session::Session,
    DeckError,
};
use crate::persistence::{
    KeyValueStore,
    Preferences,
    ThemeKey,
};

pub const INVALID_URL_STATUS: &str = "Invalid Google Sheet URL. Using built-in sample deck.";
pub const SAMPLE_DECK_STATUS: &str = "Using built-in sample deck.";
pub const SAMPLE_TAB_ID: &str = "fallback";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Resolving,
    Fetching,
    Parsing,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Connect,
    Switch,
    Refresh,
}

impl LoadKind {
    fn failure_prefix(&self) -> &'static str {
        match self {
            LoadKind::Connect => "Could not load selected deck.",
            LoadKind::Switch => "Could not switch deck.",
            LoadKind::Refresh => "Refresh failed.",
        }
    }
}

/// A resolved deck load waiting for its network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub reference: DeckReference,
    pub kind: LoadKind,
    /// The tab was named explicitly and must not be replaced by a discovered one.
    pub pinned: bool,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub request: LoadRequest,
    /// The reference actually fetched; discovery may have moved an unpinned tab.
    pub reference: DeckReference,
    pub discovered: Vec<DeckTab>,
    pub csv: Result<String, DeckError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub card_count: usize,
    pub tab_id: String,
    pub deck_name: String,
}

/// `Err` means the load failed and the fallback deck is now showing.
pub type LoadResult = Result<LoadSummary, DeckError>;

/// The deck picker contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabList {
    pub tabs: Vec<DeckTab>,
    pub selected: Option<String>,
    pub enabled: bool,
}

impl TabList {
    /// Selects `preferred` when listed, otherwise the first tab.
    pub fn new(tabs: Vec<DeckTab>, preferred: Option<&str>) -> Self {
        let selected = preferred
            .filter(|id| tabs.iter().any(|tab| tab.tab_id == *id))
            .map(str::to_string)
            .or_else(|| tabs.first().map(|tab| tab.tab_id.clone()));
        let enabled = !tabs.is_empty();
        Self { tabs, selected, enabled }
    }

    pub fn sample() -> Self {
        Self {
            tabs: vec![DeckTab::new(SAMPLE_TAB_ID, "Sample Deck")],
            selected: Some(SAMPLE_TAB_ID.to_string()),
            enabled: false,
        }
    }

    pub fn selected_tab(&self) -> Option<&DeckTab> {
        let selected = self.selected.as_deref()?;
        self.tabs.iter().find(|tab| tab.tab_id == selected)
    }

    fn select(&mut self, tab_id: &str) {
        if self.tabs.iter().any(|tab| tab.tab_id == tab_id) {
            self.selected = Some(tab_id.to_string());
        }
    }
}

/// Concatenates tab lists, keeping the first occurrence of every tab id.
fn merge_tabs<'a>(lists: impl IntoIterator<Item = &'a [DeckTab]>) -> Vec<DeckTab> {
    let mut merged: Vec<DeckTab> = Vec::new();
    for tab in lists.into_iter().flatten() {
        if !merged.iter().any(|known| known.tab_id == tab.tab_id) {
            merged.push(tab.clone());
        }
    }
    merged
}

/// Discovers tabs (on connect) and downloads the CSV for a request. Holds no loader state, so
/// it can run off the UI thread.
pub async fn fetch_deck<S: SheetSource>(source: &S, request: LoadRequest) -> FetchOutcome {
    let mut reference = request.reference.clone();
    let mut discovered = Vec::new();

    if request.kind == LoadKind::Connect {
        discovered = source.discover_tabs(&reference.spreadsheet_id).await;
        if discovered.is_empty() {
            log::info!(
                "Connected to {}, but tab names are unavailable. Using gid-based deck selection.",
                reference.spreadsheet_id
            );
        } else if !request.pinned && !discovered.iter().any(|tab| tab.tab_id == reference.tab_id)
        {
            reference.tab_id = discovered[0].tab_id.clone();
        }
    }

    let csv = source.fetch_csv(&reference).await;
    FetchOutcome { request, reference, discovered, csv }
}

fn parse_deck(csv: Result<String, DeckError>) -> Result<(String, Vec<Card>), DeckError> {
    let text = csv?;
    let cards = infer_cards(&parse_rows(&text));
    if cards.is_empty() {
        return Err(DeckError::EmptyDeck);
    }
    Ok((text, cards))
}

/// Owns the session, registry and preferences, and drives every deck load.
pub struct DeckLoader<S, K> {
    source: S,
    store: K,
    preferences: Preferences,
    registry: DeckRegistry,
    session: Session,
    tabs: TabList,
    active_spreadsheet_id: String,
    phase: LoadPhase,
    status: String,
}

impl<S: SheetSource, K: KeyValueStore> DeckLoader<S, K> {
    pub fn new(source: S, store: K) -> Self {
        let preferences = Preferences::load(&store);
        let registry = DeckRegistry::load(&store).into_value();

        Self {
            source,
            store,
            preferences,
            registry,
            session: Session::default(),
            tabs: TabList::default(),
            active_spreadsheet_id: String::new(),
            phase: LoadPhase::Idle,
            status: String::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tabs(&self) -> &TabList {
        &self.tabs
    }

    pub fn registry(&self) -> &DeckRegistry {
        &self.registry
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn active_spreadsheet_id(&self) -> &str {
        &self.active_spreadsheet_id
    }

    pub fn flip(&mut self) {
        self.session.flip();
    }

    pub fn next(&mut self) {
        self.session.next();
    }

    pub fn previous(&mut self) {
        self.session.previous();
    }

    pub fn shuffle(&mut self) {
        self.session.shuffle();
    }

    pub fn set_theme(&mut self, theme: ThemeKey) {
        self.preferences.set_theme(&mut self.store, theme);
    }

    fn apply_fallback(&mut self, message: impl Into<String>) {
        self.session = Session::new(fallback_deck(), self.active_spreadsheet_id.clone());
        self.phase = LoadPhase::Idle;
        self.status = message.into();
        log::info!("{}", self.status);
    }

    /// Startup: reconnects to `url_override` or the saved sheet, or shows the sample deck.
    pub fn begin_resume(&mut self, url_override: Option<&str>) -> Option<LoadRequest> {
        let url = url_override
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.preferences.last_url.clone());

        if url.is_empty() {
            self.tabs = TabList::sample();
            self.apply_fallback(SAMPLE_DECK_STATUS);
            return None;
        }

        self.begin_connect(&url).ok()
    }

    pub fn begin_connect(&mut self, raw_url: &str) -> Result<LoadRequest, DeckError> {
        self.phase = LoadPhase::Resolving;

        let parts = match resolve_parts(raw_url) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("{}", e);
                self.apply_fallback(INVALID_URL_STATUS);
                return Err(e);
            }
        };

        self.preferences.set_last_url(&mut self.store, raw_url.trim());
        self.active_spreadsheet_id = parts.spreadsheet_id.clone();

        let pinned = parts.tab_id.is_some();
        let tab_id = match parts.tab_id {
            Some(tab_id) => tab_id,
            None if self.registry.contains(&parts.spreadsheet_id, &self.preferences.last_tab_id) =>
            {
                self.preferences.last_tab_id.clone()
            }
            None => DEFAULT_TAB_ID.to_string(),
        };

        self.phase = LoadPhase::Fetching;
        Ok(LoadRequest {
            reference: DeckReference::new(parts.spreadsheet_id, tab_id),
            kind: LoadKind::Connect,
            pinned,
        })
    }

    /// `None` when no spreadsheet is connected yet or the tab id is blank.
    pub fn begin_switch(&mut self, tab_id: &str) -> Option<LoadRequest> {
        if self.active_spreadsheet_id.is_empty() || tab_id.trim().is_empty() {
            return None;
        }

        self.tabs.select(tab_id);
        self.phase = LoadPhase::Fetching;
        Some(LoadRequest {
            reference: DeckReference::new(self.active_spreadsheet_id.clone(), tab_id.trim()),
            kind: LoadKind::Switch,
            pinned: true,
        })
    }

    /// Reloads the selected tab, or reconnects with the saved URL when nothing is active.
    pub fn begin_refresh(&mut self) -> Result<LoadRequest, DeckError> {
        if self.active_spreadsheet_id.is_empty() {
            let url = self.preferences.last_url.clone();
            return self.begin_connect(&url);
        }

        let tab_id = self
            .tabs
            .selected
            .clone()
            .filter(|id| id != SAMPLE_TAB_ID)
            .unwrap_or_else(|| DEFAULT_TAB_ID.to_string());

        self.phase = LoadPhase::Fetching;
        Ok(LoadRequest {
            reference: DeckReference::new(self.active_spreadsheet_id.clone(), tab_id),
            kind: LoadKind::Refresh,
            pinned: true,
        })
    }

    /// Applies a finished fetch. Whatever completes last overwrites the session.
    pub fn complete(&mut self, outcome: FetchOutcome) -> LoadResult {
        let FetchOutcome { request, reference, discovered, csv } = outcome;
        self.phase = LoadPhase::Parsing;
        self.active_spreadsheet_id = reference.spreadsheet_id.clone();

        let (text, cards) = match parse_deck(csv) {
            Ok(parsed) => parsed,
            Err(error) => {
                if request.kind == LoadKind::Connect {
                    self.tabs = self.tabs_after_failed_connect(&reference, &discovered);
                }
                log::warn!(
                    "Loading {}/{} failed: {}",
                    reference.spreadsheet_id,
                    reference.tab_id,
                    error
                );
                self.apply_fallback(format!("{} {}", request.kind.failure_prefix(), error));
                return Err(error);
            }
        };

        let spreadsheet_id = reference.spreadsheet_id.as_str();
        let tab_id = reference.tab_id.as_str();

        if !self.registry.contains(spreadsheet_id, tab_id) {
            let name = suggest_deck_name(&text)
                .or_else(|| {
                    discovered
                        .iter()
                        .find(|tab| tab.tab_id == tab_id)
                        .map(|tab| tab.display_name.clone())
                })
                .unwrap_or_else(|| ordinal_deck_name(self.registry.tabs(spreadsheet_id).len() + 1));

            log::info!("Registering tab {} of {} as '{}'", tab_id, spreadsheet_id, name);
            self.registry.register_tab(spreadsheet_id, tab_id, &name);
            self.registry.save(&mut self.store);
        }

        let previous: &[DeckTab] = if request.kind != LoadKind::Connect && self.tabs.enabled {
            &self.tabs.tabs
        } else {
            &[]
        };
        let merged =
            merge_tabs([discovered.as_slice(), self.registry.tabs(spreadsheet_id), previous]);
        self.tabs = TabList::new(merged, Some(tab_id));

        let deck_name = self
            .tabs
            .selected_tab()
            .map(|tab| tab.display_name.clone())
            .unwrap_or_else(|| format!("gid {}", tab_id));

        let summary =
            LoadSummary { card_count: cards.len(), tab_id: tab_id.to_string(), deck_name };

        self.session = Session::new(cards, spreadsheet_id);
        self.preferences.set_last_tab_id(&mut self.store, tab_id);
        self.phase = LoadPhase::Ready;
        self.status =
            format!("Loaded {} cards from deck: {}.", summary.card_count, summary.deck_name);
        log::info!("{}", self.status);

        Ok(summary)
    }

    fn tabs_after_failed_connect(
        &self,
        reference: &DeckReference,
        discovered: &[DeckTab],
    ) -> TabList {
        let known = self.registry.tabs(&reference.spreadsheet_id);
        let tabs = if !discovered.is_empty() {
            discovered.to_vec()
        } else if !known.is_empty() {
            known.to_vec()
        } else {
            vec![DeckTab::default_tab()]
        };
        TabList::new(tabs, Some(reference.tab_id.as_str()))
    }

    pub async fn resume(&mut self, url_override: Option<&str>) -> Option<LoadResult> {
        let request = self.begin_resume(url_override)?;
        let outcome = fetch_deck(&self.source, request).await;
        Some(self.complete(outcome))
    }

    pub async fn connect(&mut self, raw_url: &str) -> LoadResult {
        let request = self.begin_connect(raw_url)?;
        let outcome = fetch_deck(&self.source, request).await;
        self.complete(outcome)
    }

    pub async fn switch_tab(&mut self, tab_id: &str) -> Option<LoadResult> {
        let request = self.begin_switch(tab_id)?;
        let outcome = fetch_deck(&self.source, request).await;
        Some(self.complete(outcome))
    }

    pub async fn refresh(&mut self) -> LoadResult {
        let request = self.begin_refresh()?;
        let outcome = fetch_deck(&self.source, request).await;
        self.complete(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::HashMap,
    };

    use super::*;
    use crate::persistence::{
        preferences::{
            STORAGE_GID_KEY,
            STORAGE_REGISTRY_KEY,
            STORAGE_URL_KEY,
        },
        MemoryStore,
    };

    const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/SHEET/edit";

    #[derive(Default)]
    struct FakeSheets {
        csv: HashMap<String, Result<String, u16>>,
        tabs: Vec<DeckTab>,
        fetched: RefCell<Vec<DeckReference>>,
    }

    impl FakeSheets {
        fn with_csv(mut self, tab_id: &str, text: &str) -> Self {
            self.csv.insert(tab_id.to_string(), Ok(text.to_string()));
            self
        }

        fn with_status(mut self, tab_id: &str, status: u16) -> Self {
            self.csv.insert(tab_id.to_string(), Err(status));
            self
        }

        fn with_tabs(mut self, tabs: Vec<DeckTab>) -> Self {
            self.tabs = tabs;
            self
        }

        fn fetched_tabs(&self) -> Vec<String> {
            self.fetched.borrow().iter().map(|r| r.tab_id.clone()).collect()
        }
    }

    impl SheetSource for FakeSheets {
        async fn fetch_csv(&self, reference: &DeckReference) -> Result<String, DeckError> {
            self.fetched.borrow_mut().push(reference.clone());
            match self.csv.get(&reference.tab_id) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(status)) => Err(DeckError::HttpStatus(*status)),
                None => Err(DeckError::HttpStatus(404)),
            }
        }

        async fn discover_tabs(&self, _spreadsheet_id: &str) -> Vec<DeckTab> {
            self.tabs.clone()
        }
    }

    fn loader(sheets: FakeSheets) -> DeckLoader<FakeSheets, MemoryStore> {
        DeckLoader::new(sheets, MemoryStore::new())
    }

    fn tab_ids(loader: &DeckLoader<FakeSheets, MemoryStore>) -> Vec<&str> {
        loader.tabs().tabs.iter().map(|tab| tab.tab_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_invalid_url_loads_fallback() {
        let mut loader = loader(FakeSheets::default());
        let result = loader.connect("https://example.com/not-a-sheet").await;

        assert!(matches!(result, Err(DeckError::InvalidReference(_))));
        assert_eq!(loader.status(), INVALID_URL_STATUS);
        assert_eq!(loader.session().cards(), fallback_deck().as_slice());
        assert_eq!(loader.phase(), LoadPhase::Idle);
        assert_eq!(loader.store().get(STORAGE_URL_KEY), None);
        assert!(loader.source().fetched_tabs().is_empty());
    }

    #[tokio::test]
    async fn test_connect_registers_suggested_name() {
        let sheets = FakeSheets::default().with_csv("0", "Italian,English\ncane,dog\ngatto,cat");
        let mut loader = loader(sheets);

        let summary = loader.connect(SHEET_URL).await.unwrap();
        assert_eq!(summary.card_count, 2);
        assert_eq!(summary.deck_name, "Italian / English");
        assert_eq!(loader.status(), "Loaded 2 cards from deck: Italian / English.");
        assert_eq!(loader.phase(), LoadPhase::Ready);
        assert_eq!(loader.session().current_card(), Some(&Card::new("cane", "dog")));
        assert_eq!(loader.session().active_spreadsheet_id(), "SHEET");

        assert_eq!(loader.registry().tabs("SHEET"), &[DeckTab::new("0", "Italian / English")]);
        assert_eq!(loader.tabs().selected.as_deref(), Some("0"));
        assert!(loader.tabs().enabled);

        let store = loader.store();
        assert_eq!(store.get(STORAGE_URL_KEY), Some(SHEET_URL));
        assert_eq!(store.get(STORAGE_GID_KEY), Some("0"));
        assert!(store.get(STORAGE_REGISTRY_KEY).unwrap().contains("Italian / English"));
    }

    #[tokio::test]
    async fn test_generic_headers_get_ordinal_name() {
        let sheets = FakeSheets::default()
            .with_csv("0", "front,back\nq,a")
            .with_csv("5", "front,back\nq2,a2");
        let mut loader = loader(sheets);

        loader.connect(SHEET_URL).await.unwrap();
        let summary = loader.switch_tab("5").await.unwrap().unwrap();

        assert_eq!(summary.deck_name, "Deck 2");
        assert_eq!(tab_ids(&loader), vec!["0", "5"]);
        assert_eq!(loader.registry().tabs("SHEET")[0].display_name, "Deck 1");
    }

    #[tokio::test]
    async fn test_discovered_names_and_tab_list() {
        let sheets = FakeSheets::default()
            .with_tabs(vec![DeckTab::new("0", "Verbs"), DeckTab::new("7", "Nouns")])
            .with_csv("0", "front,back\nandare,to go");
        let mut loader = loader(sheets);

        let summary = loader.connect(SHEET_URL).await.unwrap();
        assert_eq!(summary.deck_name, "Verbs");
        assert_eq!(tab_ids(&loader), vec!["0", "7"]);
        assert_eq!(loader.tabs().selected_tab(), Some(&DeckTab::new("0", "Verbs")));
    }

    #[tokio::test]
    async fn test_unpinned_tab_moves_to_first_discovered() {
        let sheets = FakeSheets::default()
            .with_tabs(vec![DeckTab::new("7", "Nouns")])
            .with_csv("7", "term,definition\ncasa,house");
        let mut loader = loader(sheets);

        loader.connect(SHEET_URL).await.unwrap();
        assert_eq!(loader.source().fetched_tabs(), vec!["7"]);

        // An explicit gid is honoured even when discovery does not list it.
        let pinned = format!("{}#gid=3", SHEET_URL);
        let _ = loader.connect(&pinned).await;
        assert_eq!(loader.source().fetched_tabs(), vec!["7", "3"]);
    }

    #[tokio::test]
    async fn test_switch_failure_keeps_tab_list() {
        let sheets = FakeSheets::default()
            .with_csv("0", "word,meaning\nuno,one")
            .with_csv("4", "word,meaning\ndue,two")
            .with_status("9", 503);
        let mut loader = loader(sheets);

        loader.connect(SHEET_URL).await.unwrap();
        loader.switch_tab("4").await.unwrap().unwrap();
        let before = loader.tabs().tabs.clone();

        let result = loader.switch_tab("9").await.unwrap();
        assert!(matches!(result, Err(DeckError::HttpStatus(503))));
        assert_eq!(loader.status(), "Could not switch deck. Request failed (503)");
        assert_eq!(loader.tabs().tabs, before);
        assert_eq!(loader.registry().tabs("SHEET").len(), 2);
        assert_eq!(loader.session().cards(), fallback_deck().as_slice());
        assert_eq!(loader.phase(), LoadPhase::Idle);
    }

    #[tokio::test]
    async fn test_connect_failure_restores_known_tabs() {
        let mut registry = DeckRegistry::new();
        registry.register_tab("SHEET", "2", "Animals");
        registry.register_tab("SHEET", "3", "Food");
        let mut store = MemoryStore::new();
        registry.save(&mut store);

        let mut loader = DeckLoader::new(FakeSheets::default().with_status("0", 500), store);
        let result = loader.connect(SHEET_URL).await;

        assert!(matches!(result, Err(DeckError::HttpStatus(500))));
        assert_eq!(tab_ids(&loader), vec!["2", "3"]);
        assert_eq!(loader.status(), "Could not load selected deck. Request failed (500)");
        assert_eq!(loader.active_spreadsheet_id(), "SHEET");
    }

    #[tokio::test]
    async fn test_connect_failure_without_known_tabs_lists_default() {
        let mut loader = loader(FakeSheets::default().with_csv("0", "only\nalpha\nbeta"));
        let result = loader.connect(SHEET_URL).await;

        assert!(matches!(result, Err(DeckError::EmptyDeck)));
        assert_eq!(loader.tabs().tabs, vec![DeckTab::default_tab()]);
        assert!(loader.status().starts_with("Could not load selected deck. No valid cards found."));
        assert!(loader.registry().tabs("SHEET").is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reloads_selected_tab() {
        let sheets = FakeSheets::default()
            .with_csv("0", "term,definition\none,1")
            .with_csv("6", "term,definition\ntwo,2\nthree,3\nfour,4");
        let mut loader = loader(sheets);

        loader.connect(SHEET_URL).await.unwrap();
        loader.switch_tab("6").await.unwrap().unwrap();
        loader.next();

        let summary = loader.refresh().await.unwrap();
        assert_eq!(summary.tab_id, "6");
        assert_eq!(summary.card_count, 3);
        assert_eq!(loader.session().current_index(), 0);
        assert_eq!(loader.source().fetched_tabs(), vec!["0", "6", "6"]);
    }

    #[tokio::test]
    async fn test_refresh_without_sheet_uses_saved_url() {
        let store = MemoryStore::new().with_entry(STORAGE_URL_KEY, SHEET_URL);
        let mut loader = DeckLoader::new(FakeSheets::default().with_csv("0", "a,b\nx,y"), store);

        let summary = loader.refresh().await.unwrap();
        assert_eq!(summary.card_count, 1);
        assert_eq!(loader.active_spreadsheet_id(), "SHEET");
    }

    #[tokio::test]
    async fn test_switch_without_sheet_is_noop() {
        let mut loader = loader(FakeSheets::default());
        assert!(loader.switch_tab("3").await.is_none());
        assert!(loader.source().fetched_tabs().is_empty());
    }

    #[tokio::test]
    async fn test_resume_without_saved_url_shows_sample() {
        let mut loader = loader(FakeSheets::default());
        assert!(loader.resume(None).await.is_none());

        assert_eq!(loader.status(), SAMPLE_DECK_STATUS);
        assert_eq!(loader.tabs(), &TabList::sample());
        assert!(!loader.tabs().enabled);
        assert_eq!(loader.session().len(), 10);
    }

    #[tokio::test]
    async fn test_resume_restores_saved_tab() {
        let mut registry = DeckRegistry::new();
        registry.register_tab("SHEET", "8", "Saved");
        let mut store = MemoryStore::new()
            .with_entry(STORAGE_URL_KEY, SHEET_URL)
            .with_entry(STORAGE_GID_KEY, "8");
        registry.save(&mut store);

        let sheets = FakeSheets::default().with_csv("8", "front,back\nsaved,card");
        let mut loader = DeckLoader::new(sheets, store);
        let summary = loader.resume(None).await.unwrap().unwrap();

        assert_eq!(summary.tab_id, "8");
        assert_eq!(summary.deck_name, "Saved");
    }

    #[tokio::test]
    async fn test_corrupt_registry_starts_empty() {
        let store = MemoryStore::new().with_entry(STORAGE_REGISTRY_KEY, "{{{");
        let mut loader = DeckLoader::new(FakeSheets::default().with_csv("0", "a,b\nx,y"), store);
        assert!(loader.registry().tabs("SHEET").is_empty());

        loader.connect(SHEET_URL).await.unwrap();
        assert_eq!(loader.registry().tabs("SHEET").len(), 1);
    }

    #[tokio::test]
    async fn test_last_completed_load_wins() {
        let sheets = FakeSheets::default()
            .with_csv("0", "front,back\nfirst,1")
            .with_csv("1", "front,back\nsecond,2\nsecond again,3");
        let mut loader = loader(sheets);
        loader.connect(SHEET_URL).await.unwrap();

        let slow = loader.begin_switch("0").unwrap();
        let fast = loader.begin_switch("1").unwrap();

        let fast_outcome = fetch_deck(loader.source(), fast).await;
        let slow_outcome = fetch_deck(loader.source(), slow).await;
        loader.complete(fast_outcome).unwrap();
        loader.complete(slow_outcome).unwrap();

        assert_eq!(loader.session().len(), 1);
        assert_eq!(loader.session().cards()[0].front, "first");
        assert_eq!(loader.tabs().selected.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_theme_is_persisted() {
        let mut loader = loader(FakeSheets::default());
        loader.set_theme(ThemeKey::Paper);
        assert_eq!(loader.preferences().theme, ThemeKey::Paper);
        assert_eq!(Preferences::load(loader.store()).theme, ThemeKey::Paper);
    }
}
