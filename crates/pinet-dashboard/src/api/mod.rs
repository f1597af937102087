//! API route handlers

pub mod error;
pub mod hosts;
