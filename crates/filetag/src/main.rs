//! # Filetag CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/filetag/src/cli/)                     │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - logging, config and context wiring (commands.rs)      │
//! │  - terminal and JSON rendering (render.rs, styles.rs)    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API Layer (crates/filetagapp/src/api.rs)                │
//! │  - turns raw paths and condition strings into targets    │
//! │  - returns structured `CmdResult` values                 │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Commands, query engine, store (crates/filetagapp/src/)  │
//! │  - no knowledge of stdout/stderr or process exits        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Business logic is tested in the library. Here, `render.rs` is tested with
//! canned `CmdResult`s and color disabled, and `tests/cli_e2e.rs` drives the
//! built binary against a temporary store.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
