//! Submission coordination.
//!
//! The service is an opaque async collaborator; the session only tracks
//! the in-flight flag and applies the result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::session::{FormSession, FormView};
use super::store;
use super::types::FormData;
use crate::config::SubmissionConfig;

/// Generic notice shown when the service reports a failure
pub const SUBMIT_FAILED_NOTICE: &str = "Error al enviar el formulario";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("submission endpoint returned HTTP {status}")]
    Status { status: u16 },
}

/// Accepts the full form data and resolves to success or failure
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(&self, data: &FormData) -> Result<(), SubmitError>;
}

/// Stand-in backend that waits and then succeeds (or fails on request)
#[derive(Debug, Clone)]
pub struct SimulatedSubmission {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmission {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmission {
    async fn submit(&self, _data: &FormData) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(SubmitError::Rejected("simulated failure".to_string()));
        }
        Ok(())
    }
}

/// POSTs the form data as JSON
#[derive(Debug, Clone)]
pub struct HttpSubmission {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmission {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionService for HttpSubmission {
    async fn submit(&self, data: &FormData) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint).json(data).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// HTTP when an endpoint is configured, otherwise the simulated service
pub fn service_from_config(config: &SubmissionConfig) -> Arc<dyn SubmissionService> {
    match config.endpoint {
        Some(ref endpoint) => Arc::new(HttpSubmission::new(endpoint.clone())),
        None if config.simulate_failure => Arc::new(SimulatedSubmission::failing(config.delay())),
        None => Arc::new(SimulatedSubmission::new(config.delay())),
    }
}

/// Result of applying a submission result to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed { email: String },
    Failed,
    /// No submission was in flight
    Ignored,
}

impl FormSession {
    /// Enter the submitting state.
    ///
    /// Only on the terminal step, while editing, with no submission in
    /// flight and the step valid. Returns the data to hand to the service.
    pub fn begin_submit(&mut self) -> Option<FormData> {
        if self.submitting || !self.is_terminal() || self.view != FormView::Editing {
            return None;
        }
        if !self.validate_step().is_empty() {
            return None;
        }
        self.save_current();
        self.submitting = true;
        self.notice = None;
        tracing::info!("submitting form");
        Some(self.data.clone())
    }

    /// Apply the service result and leave the submitting state
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        if !self.submitting {
            return SubmitOutcome::Ignored;
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                let email = self.data.contact_email().unwrap_or_default().to_string();
                if let Err(e) = store::clear(self.slot.as_ref()) {
                    tracing::warn!(error = %e, "failed to clear snapshot after submission");
                }
                self.data.clear();
                self.inputs.clear();
                self.errors.clear();
                self.view = FormView::Confirmed {
                    email: email.clone(),
                };
                tracing::info!("form submitted");
                SubmitOutcome::Confirmed { email }
            }
            Err(e) => {
                tracing::warn!(error = %e, "form submission failed");
                self.notice = Some(SUBMIT_FAILED_NOTICE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Begin, await the service and finish in one call. `None` when the
    /// session refused to begin.
    pub async fn submit_with(&mut self, service: &dyn SubmissionService) -> Option<SubmitOutcome> {
        let data = self.begin_submit()?;
        let result = service.submit(&data).await;
        Some(self.finish_submit(result))
    }

    /// Label of the submit affordance
    pub fn submit_button(&self) -> &'static str {
        if self.submitting {
            "Enviando..."
        } else {
            "Enviar"
        }
    }
}
