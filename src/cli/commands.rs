//! Command dispatch

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::MenuSession;
use crate::config::{expand_path, global_config_path, DisplayStyle, Settings};
use crate::domain::Tree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Menu) => _menu(cli),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(cli),
            ConfigCommands::Init { force } => _config_init(cli, *force),
            ConfigCommands::Path => _config_path(cli),
        },
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

/// Loads settings and applies the command line overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        settings.root = root.clone();
    }
    if cli.pretty {
        settings.display.style = DisplayStyle::Pretty;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(cli))]
fn _menu(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    if !settings.display.color {
        colored::control::set_override(false);
    }

    let tree = Tree::new(settings.root);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession::new(tree, stdin.lock(), stdout.lock(), settings.display.style);
    session.run()
}

#[instrument(skip(cli))]
fn _config_show(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let toml = settings.to_toml()?;
    output::info(&mut io::stdout(), &toml).map_err(|e| CliError::io("write config", e))
}

#[instrument(skip(cli))]
fn _config_init(cli: &Cli, force: bool) -> CliResult<()> {
    let path = config_target(cli)?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
    }
    fs::write(&path, Settings::template())
        .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
    output::success(&mut io::stdout(), &format!("Created {}", path.display()))
        .map_err(|e| CliError::io("write output", e))
}

#[instrument(skip(cli))]
fn _config_path(cli: &Cli) -> CliResult<()> {
    let mut stdout = io::stdout();
    let global = global_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".to_string());
    let mut lines = vec![format!("global: {}", global)];
    if let Some(path) = &cli.config {
        lines.push(format!("explicit: {}", expand_path(path).display()));
    }
    for line in lines {
        output::info(&mut stdout, &line).map_err(|e| CliError::io("write output", e))?;
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn config_target(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config {
        Some(path) => Ok(expand_path(path)),
        None => global_config_path()
            .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string())),
    }
}
