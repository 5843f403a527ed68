use rand::{
    seq::SliceRandom,
    Rng,
};

use super::models::Card;

pub const EMPTY_FRONT: &str = "No cards found";
pub const EMPTY_HINT: &str = "Use any two populated columns (for example A/B or front/back).";

/// What the card view should draw for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub front: &'a str,
    pub back: &'a str,
    pub position: String,
    pub revealed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cards: Vec<Card>,
    current_index: usize,
    revealed: bool,
    active_spreadsheet_id: String,
}

impl Session {
    pub fn new(cards: Vec<Card>, active_spreadsheet_id: impl Into<String>) -> Self {
        Self {
            cards,
            current_index: 0,
            revealed: false,
            active_spreadsheet_id: active_spreadsheet_id.into(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn active_spreadsheet_id(&self) -> &str {
        &self.active_spreadsheet_id
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.cards.len();
        self.revealed = false;
    }

    pub fn previous(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current_index = (self.current_index + self.cards.len() - 1) % self.cards.len();
        self.revealed = false;
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.current_index = 0;
        self.revealed = false;
    }

    pub fn view(&self) -> CardView<'_> {
        match self.current_card() {
            Some(card) => CardView {
                front: &card.front,
                back: &card.back,
                position: format!("Card {}/{}", self.current_index + 1, self.cards.len()),
                revealed: self.revealed,
            },
            None => CardView {
                front: EMPTY_FRONT,
                back: EMPTY_HINT,
                position: "Card 0/0".to_string(),
                revealed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn session(count: usize) -> Session {
        let cards = (0..count).map(|i| Card::new(format!("q{i}"), format!("a{i}"))).collect();
        Session::new(cards, "sheet")
    }

    #[test]
    fn test_navigation_wraps_and_hides_answer() {
        let mut session = session(3);
        session.flip();
        assert!(session.is_revealed());

        session.next();
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_revealed());

        session.next();
        session.next();
        assert_eq!(session.current_index(), 0);

        session.previous();
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.view().position, "Card 3/3");
    }

    #[test]
    fn test_empty_session_view() {
        let mut session = Session::default();
        session.next();
        session.previous();
        assert_eq!(session.current_index(), 0);

        let view = session.view();
        assert_eq!(view.front, EMPTY_FRONT);
        assert_eq!(view.position, "Card 0/0");
        assert!(view.revealed);
    }

    #[test]
    fn test_shuffle_keeps_cards_and_resets_position() {
        let mut session = session(8);
        session.next();
        session.flip();

        session.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_revealed());

        let mut fronts: Vec<&str> = session.cards().iter().map(|c| c.front.as_str()).collect();
        fronts.sort();
        assert_eq!(fronts, vec!["q0", "q1", "q2", "q3", "q4", "q5", "q6", "q7"]);
    }

    #[test]
    fn test_view_hides_until_flipped() {
        let mut session = session(1);
        let view = session.view();
        assert_eq!((view.front, view.back, view.revealed), ("q0", "a0", false));

        session.flip();
        assert!(session.view().revealed);
    }
}
