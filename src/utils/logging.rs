// Logging utilities
// Author: Gabriel Demetrios Lafis

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record};

use super::{AppError, AppResult};

/// Initialize logging with the given level.
///
/// Log lines go to stderr, so command output on stdout stays clean, or
/// are appended to `file` when one is given.
pub fn init_logging(level: LevelFilter, file: Option<&str>) -> AppResult<()> {
    let target = match file {
        Some(path) => Some(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    log::set_boxed_logger(Box::new(SimpleLogger { level, file: target }))
        .map(|()| log::set_max_level(level))
        .map_err(|err| AppError::Config(err.to_string()))
}

/// Simple logger implementation
struct SimpleLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "[{}] {}: {}", timestamp, record.level(), record.args());
                }
            }
            None => {
                let level_str = match record.level() {
                    Level::Error => "\x1B[31mERROR\x1B[0m",
                    Level::Warn => "\x1B[33mWARN\x1B[0m",
                    Level::Info => "\x1B[32mINFO\x1B[0m",
                    Level::Debug => "\x1B[34mDEBUG\x1B[0m",
                    Level::Trace => "\x1B[90mTRACE\x1B[0m",
                };
                eprintln!("[{}] {}: {}", timestamp, level_str, record.args());
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
