//! Step sequencing state machine.
//!
//! A `FormSession` is the single owner of the form state: the accumulated
//! answers, the live inputs, the current step and every error slot. The UI
//! layer calls its command handlers and reads back the derived flags.

use std::collections::BTreeMap;

use super::inputs::FormInputs;
use super::medium::{MediumKind, MEDIUM_FIELD, MEDIUM_VISUAL_FIELD};
use super::schema::{self, FieldType, StepSchema};
use super::store::{self, LoadOutcome};
use super::summary::{self, Summary};
use super::types::FormData;
use super::validate::{check_field, validate_required, FieldError};
use crate::storage::SnapshotSlot;

/// Result of a navigation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step changed
    Moved { from: usize, to: usize },
    /// Required fields failed validation; the step is unchanged
    Invalid(Vec<&'static str>),
    /// Already at the first or last step
    AtBoundary,
}

/// Result of `on_field_change`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Applied,
    /// The input is disabled because another contact medium holds a value
    Disabled,
    /// The value is not one of the field's choices
    InvalidOption,
    UnknownField,
}

/// Which top-level view the form shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Editing,
    /// Submission succeeded; the form is replaced by a confirmation
    Confirmed { email: String },
}

/// One dot of the step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressMarker {
    /// Index at or before the current step
    pub reached: bool,
    pub current: bool,
}

pub struct FormSession {
    pub(crate) data: FormData,
    pub(crate) inputs: FormInputs,
    pub(crate) current: usize,
    pub(crate) errors: BTreeMap<&'static str, FieldError>,
    pub(crate) summary: Option<Summary>,
    pub(crate) submitting: bool,
    pub(crate) view: FormView,
    pub(crate) notice: Option<&'static str>,
    pub(crate) slot: Box<dyn SnapshotSlot>,
    pub(crate) last_load: LoadOutcome,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("current", &self.current)
            .field("data", &self.data)
            .field("errors", &self.errors)
            .field("submitting", &self.submitting)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl FormSession {
    /// Start a session on step 0 with any saved snapshot restored
    pub fn new(slot: Box<dyn SnapshotSlot>) -> Self {
        let mut session = Self {
            data: FormData::new(),
            inputs: FormInputs::new(),
            current: 0,
            errors: BTreeMap::new(),
            summary: None,
            submitting: false,
            view: FormView::Editing,
            notice: None,
            slot,
            last_load: LoadOutcome::Fresh,
        };
        session.init();
        session
    }

    pub(crate) fn init(&mut self) {
        self.last_load = store::load(&mut self.data, &mut self.inputs, self.slot.as_ref());
        self.current = 0;
        self.show_step();
    }

    // Queries

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        schema::step_count()
    }

    pub fn step_schema(&self) -> &'static StepSchema {
        &schema::STEPS[self.current]
    }

    /// The last step, where the summary is shown and submission happens
    pub fn is_terminal(&self) -> bool {
        self.current + 1 == self.step_count()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn value(&self, name: &str) -> &str {
        self.inputs.value(name)
    }

    pub fn error(&self, name: &str) -> Option<FieldError> {
        self.errors.get(name).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.inputs.is_enabled(name)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.inputs.is_hidden(name)
    }

    /// Fraction of the form completed, `current / (step_count - 1)`
    pub fn progress(&self) -> f64 {
        let last = self.step_count().saturating_sub(1);
        if last == 0 {
            return 1.0;
        }
        self.current as f64 / last as f64
    }

    pub fn markers(&self) -> Vec<ProgressMarker> {
        (0..self.step_count())
            .map(|i| ProgressMarker {
                reached: i <= self.current,
                current: i == self.current,
            })
            .collect()
    }

    /// Summary computed when the terminal step was reached
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Transient notice, such as a failed submission
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// What the last snapshot load found
    pub fn last_load(&self) -> &LoadOutcome {
        &self.last_load
    }

    // Field commands

    /// Apply a new value to an input.
    ///
    /// Contact medium inputs go through the exclusivity selector. Email and
    /// telephone fields are re-validated live once they hold a non-blank
    /// value.
    pub fn on_field_change(&mut self, name: &str, value: &str) -> FieldChange {
        let Some(field) = schema::field(name) else {
            return FieldChange::UnknownField;
        };
        if field.has_options() && !value.is_empty() && !field.options.iter().any(|option| *option == value) {
            return FieldChange::InvalidOption;
        }

        if let Some(kind) = MediumKind::from_payload_field(name) {
            if !self.inputs.medium_mut().on_input(kind, value) {
                return FieldChange::Disabled;
            }
            return FieldChange::Applied;
        }

        match name {
            MEDIUM_FIELD => {
                if let Some(kind) = MediumKind::from_tag(value) {
                    self.inputs.medium_mut().choose(kind);
                }
            }
            MEDIUM_VISUAL_FIELD => {
                if let Some(kind) = MediumKind::from_tag(value) {
                    self.inputs.medium_mut().choose_visual(kind);
                }
            }
            _ => {
                self.inputs.set(name, value);
                let live = matches!(field.field_type, FieldType::Email | FieldType::Tel);
                if live && validate_required(value) {
                    self.mark(field.name, check_field(field, value));
                }
            }
        }
        FieldChange::Applied
    }

    /// Validate a required field when it loses focus
    pub fn on_field_blur(&mut self, name: &str) -> Option<FieldError> {
        let field = schema::field(name).filter(|field| field.required)?;
        let result = check_field(field, self.inputs.value(name));
        self.mark(field.name, result);
        result.err()
    }

    fn mark(&mut self, name: &'static str, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.errors.remove(name);
            }
            Err(error) => {
                self.errors.insert(name, error);
            }
        }
    }

    /// Check every required field of the current step, updating each error
    /// slot. Returns the names of the failing fields.
    pub fn validate_step(&mut self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        for field in self.step_schema().required_fields() {
            let result = check_field(field, self.inputs.value(field.name));
            if result.is_err() {
                failed.push(field.name);
            }
            self.mark(field.name, result);
        }
        failed
    }

    // Navigation

    pub fn on_next(&mut self) -> StepOutcome {
        if self.is_terminal() {
            return StepOutcome::AtBoundary;
        }
        let failed = self.validate_step();
        if !failed.is_empty() {
            tracing::debug!(step = self.current, ?failed, "step invalid");
            return StepOutcome::Invalid(failed);
        }
        self.save_current();
        self.move_to(self.current + 1)
    }

    /// Go back one step without validating; clamped at the first step
    pub fn on_prev(&mut self) -> StepOutcome {
        if self.current == 0 {
            return StepOutcome::AtBoundary;
        }
        self.save_current();
        self.move_to(self.current - 1)
    }

    fn move_to(&mut self, to: usize) -> StepOutcome {
        let from = self.current;
        self.current = to;
        self.show_step();
        tracing::debug!(from, to, "step changed");
        StepOutcome::Moved { from, to }
    }

    fn show_step(&mut self) {
        self.summary = self.is_terminal().then(|| summary::project(&self.data));
    }

    /// Save the current step and write the snapshot. A storage failure is
    /// logged and otherwise ignored.
    pub(crate) fn save_current(&mut self) {
        store::save_step(&mut self.data, &self.inputs, self.current);
        if let Err(e) = store::persist(&self.data, self.slot.as_ref()) {
            tracing::warn!(error = %e, step = self.current, "failed to persist snapshot");
        }
    }

    /// Back to an empty form on step 0, then reload whatever the slot holds
    pub fn start_over(&mut self) {
        self.data.clear();
        self.inputs.clear();
        self.errors.clear();
        self.summary = None;
        self.submitting = false;
        self.view = FormView::Editing;
        self.notice = None;
        self.init();
        tracing::debug!("form restarted");
    }
}
