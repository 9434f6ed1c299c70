//! UI-independent form core.
//!
//! `FormSession` owns all mutable state; validation, store and summary are
//! plain functions over the data it holds.

pub mod inputs;
pub mod medium;
pub mod schema;
pub mod session;
pub mod store;
pub mod submit;
pub mod summary;
pub mod types;
pub mod validate;

pub use inputs::FormInputs;
pub use medium::{ContactMedium, MediumKind, MediumSelector};
pub use session::{FieldChange, FormSession, FormView, ProgressMarker, StepOutcome};
pub use store::LoadOutcome;
pub use submit::{
    service_from_config, HttpSubmission, SimulatedSubmission, SubmissionService, SubmitError,
    SubmitOutcome,
};
pub use summary::Summary;
pub use types::{Category, FieldMap, FormData};
pub use validate::FieldError;
