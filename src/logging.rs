// Thu Feb 5 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = Box::new(ColoredLogger { level });
    log::set_boxed_logger(logger).ok();
    log::set_max_level(level);
}

pub fn init_from_env() {
    env_logger::init();
}

struct ColoredLogger {
    level: LevelFilter,
}

impl ColoredLogger {
    fn format_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = if record.target().is_empty() {
                String::new()
            } else {
                format!("[{}]", record.target())
            };
            eprintln!(
                "{} {} {}",
                Self::format_level(record.level()),
                target.dimmed(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
