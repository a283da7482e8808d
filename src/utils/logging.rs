//! Logging Utilities
//!
//! File-based and console logging.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const CRATE_TARGET: &str = "stream_profiles";

/// Get the log file path
pub fn get_log_file_path() -> PathBuf {
    super::get_app_data_dir().join("settings.log")
}

/// Simple file logger
pub struct FileLogger {
    file: Mutex<Option<File>>,
    console: bool,
    level: Level,
}

impl FileLogger {
    pub fn new(console: bool, level: Level) -> Self {
        Self {
            file: Mutex::new(Self::open_log_file()),
            console,
            level,
        }
    }

    fn open_log_file() -> Option<File> {
        let path = get_log_file_path();

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Embedding applications log through their own crates; keep those at WARN
        if metadata.target().starts_with(CRATE_TARGET) {
            metadata.level() <= self.level
        } else {
            metadata.level() <= Level::Warn
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!(
            "[{}] {} {} - {}\n",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }

        if self.console {
            print!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Initialize file logging at INFO
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    install(FileLogger::new(false, Level::Info))
}

/// Initialize file logging mirrored to stdout, including DEBUG from this crate
pub fn init_logging_with_console() -> Result<(), log::SetLoggerError> {
    install(FileLogger::new(true, Level::Debug))
}

/// Initialize stderr logging controlled by `RUST_LOG` (defaults to info)
pub fn init_env_logging() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()
}

fn install(logger: FileLogger) -> Result<(), log::SetLoggerError> {
    let max = logger.level.to_level_filter().max(LevelFilter::Warn);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max);
    Ok(())
}
