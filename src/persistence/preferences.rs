use std::fmt;

use super::store::{
    read_string,
    write_best_effort,
    KeyValueStore,
    StoreRead,
};

pub const STORAGE_URL_KEY: &str = "flashcards_sheet_url";
pub const STORAGE_GID_KEY: &str = "flashcards_sheet_gid";
pub const STORAGE_THEME_KEY: &str = "flashcards_theme";
pub const STORAGE_REGISTRY_KEY: &str = "flashcards_deck_registry";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    #[default]
    Slate,
    Paper,
    Forest,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 3] = [ThemeKey::Slate, ThemeKey::Paper, ThemeKey::Forest];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKey::Slate => "slate",
            ThemeKey::Paper => "paper",
            ThemeKey::Forest => "forest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeKey::Slate => "Slate",
            ThemeKey::Paper => "Paper",
            ThemeKey::Forest => "Forest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value.trim().to_lowercase())
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three persisted scalars. Each is read and written independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub last_url: String,
    pub last_tab_id: String,
    pub theme: ThemeKey,
}

impl Preferences {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            last_url: read_string(store, STORAGE_URL_KEY).into_value(),
            last_tab_id: read_string(store, STORAGE_GID_KEY).into_value(),
            theme: Self::read_theme(store).into_value(),
        }
    }

    pub fn read_theme<S: KeyValueStore + ?Sized>(store: &S) -> StoreRead<ThemeKey> {
        match read_string(store, STORAGE_THEME_KEY) {
            StoreRead::Stored(raw) => match ThemeKey::parse(&raw) {
                Some(key) => StoreRead::Stored(key),
                None => {
                    log::warn!("Unknown theme '{}'. Using default.", raw);
                    StoreRead::Defaulted(ThemeKey::default())
                }
            },
            StoreRead::Defaulted(_) => StoreRead::Defaulted(ThemeKey::default()),
            StoreRead::Degraded { error, .. } => {
                StoreRead::Degraded { value: ThemeKey::default(), error }
            }
        }
    }

    pub fn set_last_url<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, url: &str) {
        self.last_url = url.to_string();
        write_best_effort(store, STORAGE_URL_KEY, url);
    }

    pub fn set_last_tab_id<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, tab_id: &str) {
        self.last_tab_id = tab_id.to_string();
        write_best_effort(store, STORAGE_GID_KEY, tab_id);
    }

    pub fn set_theme<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, theme: ThemeKey) {
        self.theme = theme;
        write_best_effort(store, STORAGE_THEME_KEY, theme.as_str());
    }
}
