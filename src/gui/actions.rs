use crate::persistence::ThemeKey;

// User intents collected while drawing, applied once the frame's UI is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    // Deck loading
    Connect,
    Refresh,
    SwitchTab(String),

    // Card navigation
    Flip,
    Next,
    Previous,
    Shuffle,

    SetTheme(ThemeKey),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
