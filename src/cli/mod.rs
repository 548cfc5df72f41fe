//! # Command-Line Interface
//!
//! User-facing commands for the grocer binary.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add <name> <quantity>` | Add an item or increase an existing quantity |
//! | `list` | Print every item, sorted by name |
//! | `remove <name>` | Remove an item by exact name |
//! | `info` | Show date, operating system and version |
//! | `web <port>` | Serve the list over HTTP (feature `web`) |
//!
//! Every command operates on the file given by `--source`, in the format
//! given by `--format` (JSON by default).
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod info;
mod item;

pub use app::{Cli, Commands, run};
