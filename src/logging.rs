//! Stderr logger for the CLI.

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Map a `-v` count to a level: warn, then debug, then trace.
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        // Logging must not fail the command; a closed stderr is ignored.
        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {} {}: {}",
            Local::now().format("%H:%M:%S%.3f"),
            level,
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(StderrLogger::level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(StderrLogger::level_for_verbosity(1), LevelFilter::Debug);
        assert_eq!(StderrLogger::level_for_verbosity(5), LevelFilter::Trace);
    }

    #[test]
    fn test_installs_as_global_logger() {
        // The only test in this binary that touches the global logger.
        assert!(StderrLogger::new(LevelFilter::Warn).init().is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
        log::warn!("logger installed");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = StderrLogger::new(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
