//! The `jot` terminal host.
//!
//! - [`setup`]: clap argument definitions
//! - [`commands`]: context setup and one handler per subcommand
//! - [`render`]: view tree → styled text through templates
//! - [`styles`] / [`templates`]: theme and template sources
//! - [`prompt`]: the terminal implementation of the delete confirmation
//! - [`print`]: message output

mod commands;
mod print;
mod prompt;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
