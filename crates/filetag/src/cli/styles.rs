//! Terminal styles for the filetag CLI.
//!
//! Renderers refer to styles by meaning (a path, a field name, a muted
//! timestamp) and never pick colors inline. Every accessor takes `color` so
//! tests can render plain text regardless of the terminal.

use console::Style;
use filetagapp::commands::MessageLevel;

fn styled(style: Style, color: bool) -> Style {
    style.force_styling(color)
}

pub fn path(color: bool) -> Style {
    styled(Style::new().bold(), color)
}

pub fn field(color: bool) -> Style {
    styled(Style::new().cyan(), color)
}

pub fn value(color: bool) -> Style {
    styled(Style::new(), color)
}

pub fn muted(color: bool) -> Style {
    styled(Style::new().dim(), color)
}

pub fn time(color: bool) -> Style {
    styled(Style::new().dim().italic(), color)
}

pub fn heading(color: bool) -> Style {
    styled(Style::new().bold().underlined(), color)
}

pub fn message(level: &MessageLevel, color: bool) -> Style {
    let style = match level {
        MessageLevel::Info => Style::new().dim(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow(),
        MessageLevel::Error => Style::new().red().bold(),
    };
    styled(style, color)
}
