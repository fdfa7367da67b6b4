//! Binary-local application orchestration helpers.
//!
//! `main.rs` keeps the wiring; this module hosts startup helpers and the
//! interactive loop.

pub(crate) mod repl_loop;
pub(crate) mod startup;
