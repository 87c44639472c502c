//! Workflow services sitting between the draft model and the backend.

pub mod backend;
pub mod error;
pub mod listing;
pub mod session;
pub mod submission;
