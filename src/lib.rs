//! stepform - multi-step form controller
//!
//! The `form` module holds the UI-independent core (validation, contact
//! medium exclusivity, step store, sequencing, summary and submission).
//! The `ui` and `app` modules drive it from a terminal.

pub mod app;
pub mod config;
pub mod form;
pub mod logging;
pub mod storage;
pub mod ui;
