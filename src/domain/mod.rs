//! Draft state and the pure helpers it is built from.

pub mod draft;
pub mod error;
pub mod locale;
pub mod media;
pub mod parse;
pub mod translation;
