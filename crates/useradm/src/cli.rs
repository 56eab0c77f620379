use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use user_core::UserPatch;

#[derive(Parser, Debug)]
#[command(name = "useradm", version, about = "Admin client for a users REST API")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "USERADM_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:8080 (overrides config file)
    #[arg(long, env = "USERADM_URL", global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all users
    #[command(visible_alias = "ls")]
    List,
    /// Show a single user
    Get {
        /// User ID
        id: i64,
    },
    /// Create a user, then show the refreshed list
    ///
    /// Nothing is sent unless every field passes validation.
    #[command(visible_alias = "new")]
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update a user, then show the refreshed list
    ///
    /// The form is pre-filled from the server; only the flags given replace
    /// the fetched values.
    #[command(visible_alias = "edit")]
    Update {
        /// User ID
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a user, then show the refreshed list
    #[command(visible_alias = "rm")]
    Delete {
        /// User ID
        id: i64,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Configuration operations
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Write a useradm.toml config file in the current directory
    Init {
        /// API base URL
        #[arg(long)]
        url: String,
        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "useradm", &mut std::io::stdout());
    }
}

/// Editable user fields as command-line flags
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Login name (max 50 characters)
    #[arg(long)]
    pub user_name: Option<String>,
    /// First name (max 50 characters)
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last name (max 50 characters)
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email address (max 100 characters)
    #[arg(long)]
    pub email: Option<String>,
    /// Status: A (active), I (inactive) or T (terminated)
    #[arg(long, visible_alias = "user-status")]
    pub status: Option<String>,
    /// Department (max 50 characters)
    #[arg(long)]
    pub department: Option<String>,
}

impl FieldArgs {
    pub fn to_patch(&self) -> UserPatch {
        UserPatch {
            user_name: self.user_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            user_status: self.status.clone(),
            department: self.department.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Show the config file paths that are searched
    Path,
    /// Test the connection by listing users
    Test,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_flags_become_partial_patch() {
        let cli = Cli::parse_from(["useradm", "update", "7", "--email", "new@example.com"]);
        match cli.command {
            Commands::Update { id, fields } => {
                assert_eq!(id, 7);
                let patch = fields.to_patch();
                assert_eq!(patch.email.as_deref(), Some("new@example.com"));
                assert!(patch.user_name.is_none());
                assert!(patch.user_status.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn status_accepts_long_alias() {
        let cli = Cli::parse_from(["useradm", "create", "--user-status", "T"]);
        match cli.command {
            Commands::Create { fields } => assert_eq!(fields.status.as_deref(), Some("T")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["useradm", "list", "-o", "json", "--url", "http://x"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.url.as_deref(), Some("http://x"));
    }
}
