//! Command dispatch.
//!
//! Builds a tmux client from the config file and command-line overrides, then
//! runs one subcommand against it.

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use std::io::Write;
use tmux_tools_config::Config;
use tmux_tools_layout::{
    CommandRunner, Direction, FocusOutcome, MoveOutcome, ProcessRunner, Tmux,
};

/// Load the config file named on the command line, or the default one, and
/// apply the socket overrides. The result is validated again so an override
/// gets the same checks as a value from the file.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            Config::load_from(path)
        }
        None => Config::load(),
    }
    .context("failed to load config")?;

    let config = match &cli.socket_name {
        Some(name) => config.with_socket_name(name.clone()),
        None => config,
    };
    let config = match &cli.socket_path {
        Some(path) => config.with_socket_path(path.clone()),
        None => config,
    };
    config
        .validate()
        .context("invalid socket option on the command line")?;
    Ok(config)
}

/// A tmux client talking to the server the config points at.
pub fn build_client(config: &Config) -> Tmux<ProcessRunner> {
    let tmux_path = config.resolve_tmux_path();
    log::debug!("using tmux at {tmux_path}");

    let mut tmux = Tmux::new(ProcessRunner::new(tmux_path))
        .with_placeholder_command(config.placeholder_command.clone());
    if let Some(name) = &config.socket_name {
        tmux = tmux.with_socket_name(name);
    }
    if let Some(path) = &config.socket_path {
        tmux = tmux.with_socket_path(path);
    }
    tmux
}

/// Main application state
pub struct App<R: CommandRunner> {
    tmux: Tmux<R>,
}

impl<R: CommandRunner> App<R> {
    pub fn new(tmux: Tmux<R>) -> Self {
        Self { tmux }
    }

    pub fn tmux(&self) -> &Tmux<R> {
        &self.tmux
    }

    /// Run `command`, writing its output to `out`.
    pub fn run(&mut self, command: &Commands, out: &mut dyn Write) -> Result<()> {
        match command {
            Commands::Wm { direction } => {
                let direction = Direction::from(*direction);
                let outcome = self
                    .tmux
                    .move_window(direction)
                    .with_context(|| format!("failed to move window {direction}"))?;
                match outcome {
                    MoveOutcome::Aborted { split } => log::warn!(
                        "move {direction} stopped after the boundary split (split pane: {})",
                        split.as_deref().unwrap_or("unknown")
                    ),
                    other => log::info!("move {direction}: {other:?}"),
                }
            }
            Commands::FocusPane { direction } => {
                let direction = Direction::from(*direction);
                match self
                    .tmux
                    .focus_direction(direction)
                    .with_context(|| format!("failed to focus pane {direction}"))?
                {
                    FocusOutcome::Moved(pane) => log::info!("focused {}", pane.id),
                    FocusOutcome::Forwarded(key) => log::info!("forwarded {key}"),
                }
            }
            Commands::Panes => {
                let panes = self.tmux.panes().context("failed to list panes")?;
                let json = serde_json::to_string_pretty(&panes)?;
                writeln!(out, "{json}")?;
            }
            Commands::Furthest { target } => {
                let pane = self
                    .tmux
                    .furthest_pane(*target)
                    .with_context(|| format!("failed to find the furthest {target} pane"))?;
                writeln!(out, "{}", pane.id)?;
            }
            Commands::Clean => {
                let killed = self
                    .tmux
                    .clean_sessions()
                    .context("failed to clean sessions")?;
                for name in killed {
                    writeln!(out, "{name}")?;
                }
            }
        }
        Ok(())
    }
}

/// Load config, connect to tmux and run the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    crate::debug::apply_config_level(config.log_level.to_level_filter());
    log::debug!("config: {config:?}");

    let mut app = App::new(build_client(&config));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.run(&cli.command, &mut out)
}
