//! Terminal preferences for table output, fixed once at start-up.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    /// ANSI colours for status cells.
    pub table_color: bool,
    /// `$COLUMNS`, when set to something usable.
    pub term_width: Option<usize>,
}

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let colour_wanted = flags.format == OutputFormat::Table && !flags.quiet;
    let prefs = UiPrefs {
        table_color: colour_wanted
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none(),
        term_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|columns| columns.trim().parse().ok())
            .filter(|width: &usize| *width >= 40),
    };
    if PREFS.set(prefs).is_err() {
        tracing::debug!("ui prefs already initialised");
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or_default()
}
