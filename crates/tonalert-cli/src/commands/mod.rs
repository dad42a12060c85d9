//! CLI command implementations.

pub mod check;
mod common;
pub mod generate;
pub mod info;
pub mod profiles;
