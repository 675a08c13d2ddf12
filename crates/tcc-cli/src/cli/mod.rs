use clap::Parser;

pub mod global;
pub mod parse;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tcc` binary.
#[derive(Debug, Parser)]
#[command(name = "tcc", version, about = "TCC - transport and logistics operations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API root, including the `/api` segment (overrides `client.base_url`)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Extra TOML config file layered under the environment
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            base_url: self.base_url.clone(),
            config: self.config.clone(),
        }
    }
}
