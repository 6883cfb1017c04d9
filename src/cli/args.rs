//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Generic rooted multi-way tree with an interactive query menu
#[derive(Parser, Debug)]
#[command(name = "treemenu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/treemenu/treemenu.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Value of the initial root node (overrides config)
    #[arg(short, long)]
    pub root: Option<String>,

    /// Render trees with box-drawing connectors (overrides config)
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template (at --config path or the global location)
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_subcommand_when_parsed_then_command_is_none() {
        let cli = Cli::try_parse_from(["treemenu", "-dd", "--root", "X"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.root.as_deref(), Some("X"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn given_config_show_when_parsed_then_config_subcommand() {
        let cli = Cli::try_parse_from(["treemenu", "config", "show", "-c", "/tmp/t.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Show
            })
        ));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.toml")));
    }
}
