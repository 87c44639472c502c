//! blogdesk: editing workflow for localized blog entries managed through a
//! remote admin backend.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
