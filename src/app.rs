use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::config::Config;
use crate::form::{service_from_config, FormSession, LoadOutcome, SubmissionService, SubmitError};
use crate::ui::terminal::TerminalScreen;
use crate::ui::{ScreenAction, WizardScreen};

type SubmitResult = Result<(), SubmitError>;

pub struct App {
    config: Config,
    session: FormSession,
    screen: WizardScreen,
    service: Arc<dyn SubmissionService>,
    /// Result of the in-flight submission task
    pending: Option<oneshot::Receiver<SubmitResult>>,
    should_quit: bool,
}

impl App {
    /// Session on the configured snapshot slot, service per config
    pub fn new(config: Config) -> Self {
        let slot = config.snapshot_slot();
        tracing::debug!(path = %slot.path().display(), "using snapshot slot");
        let session = FormSession::new(Box::new(slot));
        let service = service_from_config(&config.submission);
        Self::with_parts(config, session, service)
    }

    pub fn with_parts(
        config: Config,
        session: FormSession,
        service: Arc<dyn SubmissionService>,
    ) -> Self {
        match session.last_load() {
            LoadOutcome::Restored => tracing::info!("restored saved answers"),
            LoadOutcome::Discarded(reason) => {
                tracing::warn!(%reason, "saved answers were unreadable and have been discarded");
            }
            LoadOutcome::Unavailable(reason) => {
                tracing::warn!(%reason, "saved answers could not be read");
            }
            LoadOutcome::Fresh => {}
        }
        Self {
            config,
            session,
            screen: WizardScreen::new(),
            service,
            pending: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut screen = TerminalScreen::enter()?;
        let tick_rate = self.config.refresh_rate();

        while !self.should_quit {
            screen
                .terminal()
                .draw(|f| self.screen.render(f, &self.session))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.poll_submission();
        }

        screen.leave();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen.handle_key(&mut self.session, key) {
            ScreenAction::Submit => self.start_submission(),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::None => {}
        }
    }

    /// Hand the data to the service on a background task
    fn start_submission(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(data) = self.session.begin_submit() else {
            return;
        };
        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service.submit(&data).await;
            let _ = tx.send(result);
        });
        self.pending = Some(rx);
    }

    /// Apply the submission result once the task has delivered it
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                Err(SubmitError::Rejected("submission task ended without a result".to_string()))
            }
        };
        self.pending = None;
        let outcome = self.session.finish_submit(result);
        tracing::debug!(?outcome, "submission finished");
    }
}
