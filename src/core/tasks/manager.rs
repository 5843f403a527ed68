use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::core::{
    http::SheetSource,
    loader::{
        fetch_deck,
        LoadRequest,
    },
    DeckError,
};

/// Runs network work off the UI thread and queues the results for the next frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    in_flight: usize,
}

impl TaskManager {
    pub fn new() -> Result<Self, DeckError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, in_flight: 0 })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        self.in_flight = self.in_flight.saturating_sub(results.len());
        results
    }

    /// Number of fetches started but not yet polled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Overlapping fetches are not cancelled; results arrive in completion order.
    pub fn fetch_deck<S>(&mut self, source: S, request: LoadRequest)
    where
        S: SheetSource + Send + 'static,
    {
        let (sender, runtime) = self.task_context();
        self.in_flight += 1;

        log::debug!(
            "Fetching {}/{} in the background",
            request.reference.spreadsheet_id,
            request.reference.tab_id
        );

        thread::spawn(move || {
            let outcome = runtime.block_on(fetch_deck(&source, request));
            let _ = sender.send(TaskResult::DeckFetched(outcome));
        });
    }
}
