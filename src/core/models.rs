use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_TAB_ID: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub front: String, // Prompt side
    pub back: String,  // Answer side, hidden until revealed
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self { front: front.into(), back: back.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckReference {
    pub spreadsheet_id: String, // Opaque document key from the URL path
    pub tab_id: String,         // The sheet "gid", digits only
}

impl DeckReference {
    pub fn new(spreadsheet_id: impl Into<String>, tab_id: impl Into<String>) -> Self {
        Self { spreadsheet_id: spreadsheet_id.into(), tab_id: tab_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTab {
    #[serde(rename = "gid")]
    pub tab_id: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl DeckTab {
    pub fn new(tab_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { tab_id: tab_id.into(), display_name: display_name.into() }
    }

    pub fn default_tab() -> Self {
        Self::new(DEFAULT_TAB_ID, "Default (gid 0)")
    }
}

const FALLBACK_CARDS: &[(&str, &str)] = &[
    ("Photosynthesis", "Process plants use to convert light into chemical energy."),
    ("HTTP 404", "Status code meaning resource not found."),
    ("Mitochondria", "Organelles that produce ATP for the cell."),
    ("Pi", "Ratio of a circle's circumference to its diameter."),
    ("Refactor", "Improve code structure without changing behavior."),
    ("Inflation", "General increase in prices over time."),
    ("Osmosis", "Movement of water across a semipermeable membrane."),
    ("Git rebase", "Reapply commits onto a new base commit."),
    ("Photosphere", "Visible surface layer of the Sun."),
    ("Polymorphism", "Ability for objects to take multiple forms."),
];

/// The built-in sample deck shown whenever no live deck can be loaded.
pub fn fallback_deck() -> Vec<Card> {
    FALLBACK_CARDS.iter().map(|(front, back)| Card::new(*front, *back)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_deck_is_complete() {
        let deck = fallback_deck();
        assert_eq!(deck.len(), 10);
        assert!(deck.iter().all(|card| !card.front.is_empty() && !card.back.is_empty()));
        assert_eq!(deck[0].front, "Photosynthesis");
    }

    #[test]
    fn test_deck_tab_serializes_with_short_keys() {
        let tab = DeckTab::new("42", "Verbs");
        let json = serde_json::to_string(&tab).unwrap();
        assert_eq!(json, r#"{"gid":"42","name":"Verbs"}"#);
    }
}
