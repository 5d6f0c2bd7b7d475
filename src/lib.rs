//! Gemterm is a terminal-first chat client for Google's Gemini
//! generative-language API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the append-only conversation store, the
//!   chat session adapter, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the Gemini request/response payloads used by the
//!   session adapter.
//! - [`utils`] holds URL construction and transcript logging helpers.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::run`], which assembles configuration and dispatches
//! into [`ui::chat_loop`] for the interactive session.

pub mod api;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
