//! Types shared by the page behavior layer and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod selectors;
