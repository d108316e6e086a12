//! Bridge between the UI thread and the worker that talks to the assignment API.

pub mod commands;
pub mod runtime;
