//! tonewav CLI library.
//!
//! Command implementations for the `tonewav` binary: rendering a sine tone to
//! a WAV file and inspecting the header of an existing file.

pub mod commands;
