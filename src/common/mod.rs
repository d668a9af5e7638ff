//! Common types and errors shared by all modules

pub mod errors;
pub mod types;
