use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        /// Password (prefer --password-stdin to keep it out of shell history)
        #[arg(long, conflicts_with = "password_stdin")]
        password: Option<String>,
        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// Register a new user account and store its session token.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, conflicts_with = "password_stdin")]
        password: Option<String>,
        #[arg(long)]
        password_stdin: bool,
    },
    /// Clear the stored session token.
    Logout,
    /// Show the stored session without contacting the server.
    Status,
    /// Fetch the logged-in profile from the server.
    Whoami,
}
