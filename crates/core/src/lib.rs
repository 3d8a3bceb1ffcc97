//! Request shaping and failure classification for the fluxgate image
//! gateway.
//!
//! Nothing in this crate performs I/O: the API layer hands it a drained form,
//! and the engine crate hands it raw failures.

pub mod builder;
pub mod classify;
pub mod error;
pub mod form;
pub mod mode;
pub mod request;
