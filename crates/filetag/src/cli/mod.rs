//! # CLI Behavior
//!
//! This is **one possible UI client** for filetag, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Paths In, Records Out
//!
//! - `add`, `tag`: paths must exist. Directories are walked recursively.
//! - `delete`, `untag`, `list`: paths are matched against stored records, so
//!   files that have disappeared from disk can still be cleaned up.
//! - `find`: each argument is one condition (`group=train`, `count<30`,
//!   `name~^img_`, `owner?`); all must hold.
//!
//! ## Output
//!
//! `--output text` (default) prints one path per line plus styled status
//! messages on stderr. `--output json` prints the files and their metadata as a
//! JSON array for scripting.
//!
//! ## Module Structure
//!
//! - `commands`: logging, config, context setup and dispatch
//! - `render`: turns `CmdResult`s into text or JSON
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
