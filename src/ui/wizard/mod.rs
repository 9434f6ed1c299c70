//! Terminal front end of the form: focus, key handling and rendering.
//!
//! The screen keeps only cursor and focus state; every value, flag and
//! error is read back from the `FormSession` on each draw.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use crate::form::medium::MEDIUM_VISUAL_FIELD;
use crate::form::schema::FieldSchema;
use crate::form::{FieldChange, FormSession, FormView, StepOutcome};

use super::form_field::{cycle_option, edit_text};

pub mod steps;

#[cfg(test)]
mod tests;

/// What the app loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// Start the submission of the session's data
    Submit,
    Quit,
}

/// Focus and cursor state of the form screen
#[derive(Debug, Default)]
pub struct WizardScreen {
    /// Index into the focusable fields of the current step
    pub focus: usize,
    /// Char index of the cursor in the focused text field
    pub cursor: usize,
    /// Step the focus belongs to; focus resets when the step changes
    pub(crate) focus_step: usize,
}

impl WizardScreen {
    pub fn new() -> Self {
        Self {
            // Forces a cursor reset on the first key
            focus_step: usize::MAX,
            ..Self::default()
        }
    }

    /// Fields of the current step the user can focus. Hidden contact medium
    /// sections are skipped.
    pub fn focusable(session: &FormSession) -> Vec<&'static FieldSchema> {
        session
            .step_schema()
            .fields
            .iter()
            .filter(|field| !session.is_hidden(field.name))
            .collect()
    }

    pub fn focused_field(&self, session: &FormSession) -> Option<&'static FieldSchema> {
        Self::focusable(session).get(self.focus).copied()
    }

    /// Keep focus in range after the step or the visible fields changed
    fn sync(&mut self, session: &FormSession) {
        if self.focus_step != session.current_step() {
            self.focus_step = session.current_step();
            self.focus = 0;
            self.reset_cursor(session);
        }
        let count = Self::focusable(session).len();
        if count == 0 {
            self.focus = 0;
        } else if self.focus >= count {
            self.focus = count - 1;
        }
    }

    fn reset_cursor(&mut self, session: &FormSession) {
        self.cursor = self
            .focused_field(session)
            .map_or(0, |field| session.value(field.name).chars().count());
    }

    fn move_focus(&mut self, session: &mut FormSession, forward: bool) {
        if let Some(field) = self.focused_field(session) {
            session.on_field_blur(field.name);
        }
        let count = Self::focusable(session).len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.reset_cursor(session);
    }

    fn focus_on(&mut self, session: &FormSession, name: &str) {
        if let Some(i) = Self::focusable(session)
            .iter()
            .position(|field| field.name == name)
        {
            self.focus = i;
            self.reset_cursor(session);
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, session: &mut FormSession, key: KeyEvent) -> ScreenAction {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'q'))
        {
            return ScreenAction::Quit;
        }
        if session.is_submitting() {
            return ScreenAction::None;
        }
        if session.notice().is_some() {
            session.dismiss_notice();
        }
        if matches!(session.view(), FormView::Confirmed { .. }) {
            return match key.code {
                KeyCode::Enter => {
                    session.start_over();
                    self.focus_step = usize::MAX;
                    self.sync(session);
                    ScreenAction::None
                }
                KeyCode::Esc | KeyCode::Char('q') => ScreenAction::Quit,
                _ => ScreenAction::None,
            };
        }

        self.sync(session);
        let action = self.handle_editing_key(session, key);
        self.sync(session);
        action
    }

    fn handle_editing_key(&mut self, session: &mut FormSession, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(session, true);
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(session, false);
                ScreenAction::None
            }
            KeyCode::Enter if session.is_terminal() => ScreenAction::Submit,
            KeyCode::Enter => {
                if let StepOutcome::Invalid(failed) = session.on_next() {
                    if let Some(first) = failed.first() {
                        self.focus_on(session, first);
                    }
                }
                ScreenAction::None
            }
            KeyCode::Esc => {
                session.on_prev();
                ScreenAction::None
            }
            _ => {
                self.edit_focused(session, key.code);
                ScreenAction::None
            }
        }
    }

    fn edit_focused(&mut self, session: &mut FormSession, code: KeyCode) {
        let Some(field) = self.focused_field(session) else {
            return;
        };

        // The mirror row follows the active medium; Space re-selects its option
        if field.name == MEDIUM_VISUAL_FIELD {
            if code == KeyCode::Char(' ') {
                let current = session.value(field.name).to_string();
                session.on_field_change(field.name, &current);
            }
            return;
        }

        if field.has_options() {
            let forward = match code {
                KeyCode::Right | KeyCode::Char(' ') => true,
                KeyCode::Left => false,
                _ => return,
            };
            let next = cycle_option(field, session.value(field.name), forward);
            session.on_field_change(field.name, next);
            return;
        }

        let mut cursor = self.cursor;
        match edit_text(field.field_type, session.value(field.name), &mut cursor, code) {
            Some(new_value) => {
                if session.on_field_change(field.name, &new_value) == FieldChange::Applied {
                    self.cursor = cursor;
                }
            }
            None => self.cursor = cursor,
        }
    }

    /// Render the whole screen for the session's current state
    pub fn render(&self, frame: &mut Frame, session: &FormSession) {
        match session.view() {
            FormView::Confirmed { email } => self.render_success(frame, email),
            FormView::Editing if session.is_terminal() => self.render_review_step(frame, session),
            FormView::Editing => self.render_fields_step(frame, session),
        }
    }
}
