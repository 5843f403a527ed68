use std::time::Duration;

use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    card_view,
    status_bar::StatusBar,
    theme::{
        set_theme,
        Palette,
    },
    top_bar::TopBar,
};
use crate::{
    core::{
        loader::LoadRequest,
        tasks::{
            TaskManager,
            TaskResult,
        },
        DeckError,
        DeckLoader,
        GoogleSheetSource,
        SourceConfig,
    },
    persistence::{
        JsonFileStore,
        ThemeKey,
    },
};

pub struct FlashcardApp {
    // Deck state
    loader: DeckLoader<GoogleSheetSource, JsonFileStore>,

    // UI State
    url_input: String,
    palette: Palette,
    actions: ActionQueue,

    task_manager: TaskManager,
}

impl FlashcardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        url_override: Option<String>,
    ) -> Result<Self, DeckError> {
        let config = SourceConfig::load_or_create();
        let source = GoogleSheetSource::new(config)?;
        let store = JsonFileStore::open_default();
        log::info!("Preferences stored at {}", store.path().display());

        let loader = DeckLoader::new(source, store);
        let palette = set_theme(&cc.egui_ctx, loader.preferences().theme);
        let url_input =
            url_override.clone().unwrap_or_else(|| loader.preferences().last_url.clone());

        let mut app = Self {
            loader,
            url_input,
            palette,
            actions: ActionQueue::new(),
            task_manager: TaskManager::new()?,
        };

        if let Some(request) = app.loader.begin_resume(url_override.as_deref()) {
            app.start_fetch(request);
        }

        Ok(app)
    }

    fn start_fetch(&mut self, request: LoadRequest) {
        self.task_manager.fetch_deck(self.loader.source().clone(), request);
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::DeckFetched(outcome) => {
                // Failures are already reflected in the status line and fallback deck.
                let _ = self.loader.complete(outcome);
            }
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::Connect => {
                let url = self.url_input.trim().to_string();
                if let Ok(request) = self.loader.begin_connect(&url) {
                    self.start_fetch(request);
                }
            }
            UiAction::Refresh => {
                let request = if self.loader.active_spreadsheet_id().is_empty() {
                    let url = self.url_input.trim().to_string();
                    self.loader.begin_connect(&url)
                } else {
                    self.loader.begin_refresh()
                };
                if let Ok(request) = request {
                    self.start_fetch(request);
                }
            }
            UiAction::SwitchTab(tab_id) => {
                if let Some(request) = self.loader.begin_switch(&tab_id) {
                    self.start_fetch(request);
                }
            }
            UiAction::Flip => self.loader.flip(),
            UiAction::Next => self.loader.next(),
            UiAction::Previous => self.loader.previous(),
            UiAction::Shuffle => self.loader.shuffle(),
            UiAction::SetTheme(key) => self.apply_theme(ctx, key),
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context, key: ThemeKey) {
        self.loader.set_theme(key);
        self.palette = set_theme(ctx, key);
    }
}

impl eframe::App for FlashcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let loading = self.task_manager.in_flight() > 0;
        if loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        TopBar::show(
            ctx,
            &mut self.url_input,
            self.loader.tabs(),
            self.loader.preferences().theme,
            &mut self.actions,
        );
        StatusBar::show(ctx, self.loader.status(), loading, &self.palette);
        card_view::show(ctx, &self.loader.session().view(), &self.palette, &mut self.actions);

        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            self.handle_action(ctx, action);
        }
    }
}
