pub mod columns;
pub mod config;
pub mod csv;
pub mod errors;
pub mod http;
pub mod loader;
pub mod models;
pub mod naming;
pub mod reference;
pub mod registry;
pub mod session;
pub mod tasks;

pub use config::SourceConfig;
pub use errors::DeckError;
pub use http::{
    GoogleSheetSource,
    SheetSource,
};
pub use loader::{
    DeckLoader,
    LoadPhase,
    LoadResult,
    TabList,
};
pub use models::{
    Card,
    DeckReference,
    DeckTab,
};
pub use reference::resolve_reference;
pub use registry::DeckRegistry;
pub use session::Session;
