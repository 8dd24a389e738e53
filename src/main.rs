use clap::Parser;
use std::process::ExitCode;
use tmux_tools::app;
use tmux_tools::cli::{Cli, LogLevelArg};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied later).
    tmux_tools::debug::init_log_bridge(cli.log_level.map(LogLevelArg::to_level_filter));

    log::info!("tmux-tools {} {:?}", tmux_tools::VERSION, cli.command);

    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("tmux-tools: error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
