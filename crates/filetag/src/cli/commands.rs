//! # CLI Layer
//!
//! The **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Sets up logging
//! - Turns configuration and flags into a running context
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: convert shell arguments into typed commands via clap
//! 2. **Logging**: `env_logger` at `warn`, raised by `-v`/`-vv`, `RUST_LOG` wins
//! 3. **Context Setup**: load [`FiletagConfig`] and open the store
//! 4. **Dispatch**: route each command to the API facade
//! 5. **Output**: data on stdout, status messages on stderr

use super::render;
use super::setup::{Cli, Commands, OutputFormat};
use anyhow::Result;
use clap::Parser;
use filetagapp::commands::CmdResult;
use filetagapp::config::FiletagConfig;
use filetagapp::init::{initialize, FiletagContext};
use log::debug;
use std::path::PathBuf;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FiletagConfig::load(cli.config.as_deref())?;
    debug!("loaded config: {:?}", config);
    let mut ctx = initialize(config, cli.store.clone())?;

    let output = Output {
        format: cli.output,
        color: console::colors_enabled(),
        color_stderr: console::colors_enabled_stderr(),
    };

    match cli.command {
        Commands::Status => handle_status(&ctx, &output),
        Commands::List { path } => handle_list(&ctx, path, &output),
        Commands::Find { conditions } => {
            let result = ctx.api.find_matching(&conditions)?;
            output.listing(&result)
        }
        Commands::Add { paths } => {
            let result = ctx.api.add_paths(&paths)?;
            output.modified(&result)
        }
        Commands::Delete { paths } => {
            let result = ctx.api.delete_paths(&paths)?;
            output.modified(&result)
        }
        Commands::Tag { field, value, paths } => {
            let result = ctx.api.tag_paths(&field, &value, &paths)?;
            output.modified(&result)
        }
        Commands::Untag { field, paths } => {
            let result = ctx.api.untag_paths(&[field], &paths)?;
            output.modified(&result)
        }
        Commands::Doctor { fix } => handle_doctor(&mut ctx, fix, &output),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

struct Output {
    format: OutputFormat,
    color: bool,
    color_stderr: bool,
}

impl Output {
    fn messages(&self, result: &CmdResult) {
        eprint!("{}", render::render_messages(&result.messages, self.color_stderr));
    }

    /// Files found by a query or listing.
    fn listing(&self, result: &CmdResult) -> Result<()> {
        self.messages(result);
        match self.format {
            OutputFormat::Json => print!("{}", render::to_json(&result.listed)?),
            OutputFormat::Text => print!("{}", render::render_files(&result.listed, self.color)),
        }
        Ok(())
    }

    /// Outcome of a write. Text mode reports counts only.
    fn modified(&self, result: &CmdResult) -> Result<()> {
        self.messages(result);
        if self.format == OutputFormat::Json {
            print!("{}", render::to_json(&result.affected)?);
        }
        Ok(())
    }
}

fn handle_status(ctx: &FiletagContext, output: &Output) -> Result<()> {
    let result = ctx.api.status(&ctx.config)?;
    let Some(status) = &result.status else {
        output.messages(&result);
        return Ok(());
    };
    match output.format {
        OutputFormat::Json => print!("{}", render::to_json(status)?),
        OutputFormat::Text => print!("{}", render::render_status(status, output.color)),
    }
    output.messages(&result);
    Ok(())
}

fn handle_list(ctx: &FiletagContext, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let result = ctx.api.list(&path)?;

    if let [record] = result.records.as_slice() {
        match output.format {
            OutputFormat::Json => print!("{}", render::to_json(record)?),
            OutputFormat::Text => print!("{}", render::render_record(record, output.color)),
        }
        return Ok(());
    }
    output.listing(&result)
}

fn handle_doctor(ctx: &mut FiletagContext, fix: bool, output: &Output) -> Result<()> {
    let result = ctx.api.doctor(fix)?;
    match (output.format, &result.report) {
        (OutputFormat::Json, Some(report)) => print!("{}", render::to_json(report)?),
        _ => output.messages(&result),
    }
    Ok(())
}
