//! CLI command implementations

pub mod generate;
pub mod inspect;
pub mod json_output;
