//! # colord
//!
//! Syntax highlighting server for vim.
//!
//! Clients connect over TCP and send newline-delimited JSON requests of the
//! form `[requestId, sourceText]`. Each request is colorized with
//! [`colorize`] and answered with `[requestId, encodedLines]` on the same
//! connection, in request order.
//!
//! ```text
//! ┌──────────┐  [id, source]\n   ┌────────┐   ┌──────────┐
//! │   vim    │ ────────────────► │ Framer │──►│ Colorizer│
//! │  plugin  │ ◄──────────────── │        │◄──│          │
//! └──────────┘  [id, lines]      └────────┘   └──────────┘
//! ```

pub mod config;
pub mod framer;
pub mod protocol;
pub mod server;

pub use server::{handle_connection, ConnectionSettings, Server};
