//! Debug log for tmux-tools
//!
//! Every `log::` record, from this crate and from the layout and config
//! crates, is appended to `tmux_tools_debug.log` in the temp directory
//! (`/tmp` on most Unix systems). stdout stays reserved for command output,
//! which tmux key bindings may capture.
//!
//! Each key binding starts a new process, so sessions accumulate in one
//! file; it is truncated when a session opens it past [`MAX_LOG_BYTES`].
//!
//! Level precedence:
//! 1. `--log-level` on the command line
//! 2. `RUST_LOG` (which also mirrors records to stderr)
//! 3. `log_level` in the config file, applied once it has been loaded

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

/// Size past which the next session starts the log file afresh
pub const MAX_LOG_BYTES: u64 = 1024 * 1024;

/// File sink shared by every thread that logs
struct DebugLogger {
    path: PathBuf,
    file: Option<File>,
    open_failed: bool,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new(path: PathBuf, mirror_stderr: bool) -> Self {
        Self {
            path,
            file: None,
            open_failed: false,
            mirror_stderr,
        }
    }

    /// Open the log file on first use, so `--log-level off` never creates it.
    fn file(&mut self) -> Option<&mut File> {
        if self.file.is_none() && !self.open_failed {
            let oversized = std::fs::metadata(&self.path)
                .is_ok_and(|meta| meta.len() > MAX_LOG_BYTES);
            let mut options = OpenOptions::new();
            if oversized {
                options.write(true).truncate(true);
            } else {
                options.append(true);
            }
            match options.create(true).open(&self.path) {
                Ok(mut file) => {
                    let _ = writeln!(
                        file,
                        "{}\ntmux-tools {} session started at {} (pid {})\n{}",
                        "=".repeat(80),
                        crate::VERSION,
                        timestamp(),
                        std::process::id(),
                        "=".repeat(80)
                    );
                    self.file = Some(file);
                }
                Err(_) => {
                    // Nothing sensible to report to; stderr may be a tmux binding
                    self.open_failed = true;
                }
            }
        }
        self.file.as_mut()
    }

    fn write_line(&mut self, line: &str) {
        if self.mirror_stderr {
            eprintln!("{line}");
        }
        if let Some(file) = self.file() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Set when the command line or `RUST_LOG` chose the level.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(logger) = LOGGER.get() else {
            return;
        };
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        logger.lock().write_line(&line);
    }

    fn flush(&self) {
        if let Some(logger) = LOGGER.get() {
            let mut logger = logger.lock();
            if let Some(file) = logger.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("tmux_tools_debug.log")
}

/// Most verbose level named in a `RUST_LOG` value.
///
/// Accepts plain levels (`debug`) and `target=level` directives; directives
/// that name no level are ignored.
fn parse_env_level(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive
                .rsplit_once('=')
                .map_or(directive, |(_, level)| level);
            level.trim().parse::<LevelFilter>().ok()
        })
        .max()
}

/// Install the logger. Call once, before anything logs.
///
/// Until [`apply_config_level`] runs, the level is `cli_level`, then the
/// level from `RUST_LOG`, then `warn`.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_level = rust_log.as_deref().and_then(parse_env_level);

    let level = match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            level
        }
        None => LevelFilter::Warn,
    };

    let _ = LOGGER.set(Mutex::new(DebugLogger::new(log_path(), rust_log.is_some())));
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(level);
    }
}

/// Apply the config file's level unless the command line or `RUST_LOG`
/// already chose one.
pub fn apply_config_level(level: LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}
