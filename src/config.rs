use std::{io::Write, path::Path};

use crate::{bridge::init_log_bridge, error::Result, log_writer::LogFile, logger::Logger};

/// Builder for configuring a logger.
pub struct LoggerConfig {
    console: bool,
    console_writer: Option<Box<dyn Write + Send>>,
    writers: Vec<Box<dyn Write + Send>>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            console_writer: None,
            writers: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Disables console output.
    pub fn no_console(self) -> Self {
        Self {
            console: false,
            ..self
        }
    }
    /// Dynamically set the console flag.
    pub fn with_console(self, yes: bool) -> Self {
        Self {
            console: yes,
            ..self
        }
    }
    /// Sends console output somewhere other than stdout.
    pub fn with_console_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        Self {
            console_writer: Some(Box::new(writer)),
            ..self
        }
    }
    /// Adds a writer receiving plain lines.
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writers.push(Box::new(writer));
        self
    }
    /// Appends lines to a log file, created along with its parent directories if missing.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_writer(LogFile::new(path)?))
    }
    /// Maybe appends lines to a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(self, path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => self.with_log_file(path),
            None => Ok(self),
        }
    }

    fn apply(self, logger: &Logger) {
        let Self {
            console,
            console_writer,
            writers,
        } = self;
        if let Some(console_writer) = console_writer {
            logger.set_console_writer(console_writer);
        }
        if console {
            logger.enable_console();
        } else {
            logger.disable_console();
        }
        for writer in writers {
            logger.add_boxed_writer(writer);
        }
    }

    /// Builds a standalone logger, independent from the process-wide one.
    #[must_use]
    pub fn build(self) -> Logger {
        let logger = Logger::new();
        self.apply(&logger);
        logger
    }

    /// Applies the configuration to the process-wide logger and routes the `log` macros to it.
    ///
    /// Writers are appended to the ones already registered. Calling this again is allowed.
    pub fn init_global(self) -> &'static Logger {
        let logger = Logger::get();
        self.apply(logger);
        // already installed by an earlier call
        init_log_bridge().ok();
        logger
    }
}

/// Returns a default LoggerConfig for configuring the logger.
pub fn logger_config() -> LoggerConfig {
    LoggerConfig::default()
}
