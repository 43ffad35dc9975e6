use std::time::Duration;

use crossterm::event::{self, Event};
use importer::{Client, ClientError, ImportSummary, ImportTarget, ImportWidget, WidgetState};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

/// Result of a spawned upload, routed back to the widget that started it.
#[derive(Debug)]
pub struct UploadDone {
    pub target: ImportTarget,
    pub attempt: u64,
    pub result: std::result::Result<ImportSummary, ClientError>,
}

/// One widget per importer so the two never share a selection.
#[derive(Debug)]
pub struct AppState {
    pub active: ImportTarget,
    pub categories: ImportWidget,
    pub transactions: ImportWidget,
    pub base_url: String,
    /// Advances on every loop iteration, drives the upload spinner.
    pub tick: u64,
}

impl AppState {
    fn new(active: ImportTarget, base_url: String) -> Self {
        Self {
            active,
            categories: ImportWidget::new(ImportTarget::Categories),
            transactions: ImportWidget::new(ImportTarget::Transactions),
            base_url,
            tick: 0,
        }
    }

    pub fn widget(&self, target: ImportTarget) -> &ImportWidget {
        match target {
            ImportTarget::Categories => &self.categories,
            ImportTarget::Transactions => &self.transactions,
        }
    }

    fn widget_mut(&mut self, target: ImportTarget) -> &mut ImportWidget {
        match target {
            ImportTarget::Categories => &mut self.categories,
            ImportTarget::Transactions => &mut self.transactions,
        }
    }

    pub fn active_widget(&self) -> &ImportWidget {
        self.widget(self.active)
    }

    fn active_widget_mut(&mut self) -> &mut ImportWidget {
        self.widget_mut(self.active)
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    should_quit: bool,
    uploads_tx: UnboundedSender<UploadDone>,
    uploads_rx: UnboundedReceiver<UploadDone>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, config.timeout())?;
        let state = AppState::new(config.target()?, config.base_url.clone());
        let (uploads_tx, uploads_rx) = unbounded_channel();

        Ok(Self {
            client,
            state,
            should_quit: false,
            uploads_tx,
            uploads_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit() {
            self.drain_uploads();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            // Polling blocks, keep it off the runtime threads running uploads.
            let polled = tokio::task::block_in_place(|| -> std::io::Result<Option<Event>> {
                if event::poll(tick_rate)? {
                    return event::read().map(Some);
                }
                Ok(None)
            })?;

            match polled {
                Some(Event::Key(key)) => self.handle_action(map_key(key)),
                Some(Event::Paste(payload)) => self.handle_drop(&payload),
                Some(_) | None => {}
            }
            self.state.tick = self.state.tick.wrapping_add(1);
        }

        Ok(())
    }

    /// Applies finished uploads. Completions for attempts the widget no
    /// longer waits for are dropped by the widget itself.
    fn drain_uploads(&mut self) {
        while let Ok(done) = self.uploads_rx.try_recv() {
            self.apply_upload(done);
        }
    }

    fn apply_upload(&mut self, done: UploadDone) {
        self.state
            .widget_mut(done.target)
            .complete(done.attempt, done.result);
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        if action == AppAction::SwitchImporter {
            self.state.active = self.state.active.next();
            return;
        }

        match self.state.active_widget().state() {
            WidgetState::Idle => self.handle_idle(action),
            WidgetState::Selected(_) => self.handle_selected(action),
            WidgetState::Uploading(_) => self.handle_uploading(action),
            WidgetState::Finished(_) => self.handle_finished(action),
        }
    }

    /// The path field has focus: characters are typed, not shortcuts.
    fn handle_idle(&mut self, action: AppAction) {
        let widget = self.state.active_widget_mut();
        match action {
            AppAction::Input(ch) => widget.input_push(ch),
            AppAction::Backspace => widget.input_pop(),
            AppAction::Submit => {
                let _ = widget.select_input();
            }
            AppAction::Cancel | AppAction::Remove => widget.clear_selection(),
            _ => {}
        }
    }

    fn handle_selected(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Input('u') => self.start_upload(),
            AppAction::Cancel
            | AppAction::Remove
            | AppAction::Backspace
            | AppAction::Input('x') => self.state.active_widget_mut().clear_selection(),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_uploading(&mut self, action: AppAction) {
        match action {
            // Refused by the widget, logged as a double submit.
            AppAction::Submit | AppAction::Input('u') => self.start_upload(),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_finished(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Cancel | AppAction::Input('r') => {
                self.state.active_widget_mut().clear_selection()
            }
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    pub fn handle_drop(&mut self, payload: &str) {
        let _ = self.state.active_widget_mut().drop_payload(payload);
    }

    fn start_upload(&mut self) {
        let Ok(pending) = self.state.active_widget_mut().submit() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.uploads_tx.clone();
        tokio::spawn(async move {
            let result = pending.send(&client).await;
            let done = UploadDone {
                target: pending.target,
                attempt: pending.attempt,
                result,
            };
            if tx.send(done).is_err() {
                tracing::debug!("upload finished after the ui closed");
            }
        });
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
