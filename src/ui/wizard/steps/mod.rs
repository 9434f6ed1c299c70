//! Render methods for each view of the form

mod fields;
mod progress;
mod review;
mod success;
