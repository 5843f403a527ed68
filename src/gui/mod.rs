pub mod actions;
pub mod app;
pub mod card_view;
pub mod status_bar;
pub mod theme;
pub mod top_bar;

pub use app::FlashcardApp;
