//! Types shared between the assignment API client and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
