use crate::core::loader::FetchOutcome;

#[derive(Debug)]
pub enum TaskResult {
    DeckFetched(FetchOutcome),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::DeckFetched(_) => "deck_fetched",
        }
    }
}
