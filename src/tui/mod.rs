//! Terminal user-interface building blocks.
//!
//! This module hosts the line editor and the output renderer. Stateful input
//! logic, layout math, and output styling live in separate files.

pub mod input;
mod input_buffer;
mod input_layout;
pub mod renderer;
pub mod settings;
pub mod text;

pub use input::{read_repl_line, ReadOutcome, ReplState};
pub use renderer::Renderer;
