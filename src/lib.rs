//! # mlog
//! Minimal leveled logger with colored console output and fan-out writers.
//!
//! Every line looks like `DD-MM-YYYY HH:MM:SS [TAGG]: message`. The console gets it colored by
//! severity, every registered writer gets the same plain text.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! mlog = "0.1.0"
//! ```
//!
//! ```rust
//! mlog::info!("Hello, world!");
//! mlog::warning!("{} attempts left", 3);
//! // without arguments the message is printed as is
//! mlog::debug!("100% {} literal");
//! ```
//!
//! ## Logging to files
//! The log file is created, along with its parent directories, if it does not exist, and appended
//! to if it does.
//!
//! ```rust
//! use mlog::Logger;
//!
//! let path = std::env::temp_dir().join("mlog-doc").join("app.log");
//! std::fs::remove_file(&path).ok();
//!
//! let log = Logger::get();
//! log.set_file_writer(&path).expect("Unable to create log file");
//! log.disable_console();
//! mlog::info!("{}", "hello");
//!
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("[INFO]: hello\n"));
//! ```
//!
//! ## Configuration and the `log` crate
//! ```rust
//! use mlog::logger_config;
//!
//! let buffer = Vec::<u8>::new();
//! let logger = logger_config()
//!     .no_console()
//!     .with_writer(buffer)
//!     .init_global();
//!
//! log::info!("routed through mlog");
//! logger.notice("direct call");
//! ```
//!
//! ## Critical
//! [`Logger::critical`] logs, counts down for about six seconds and exits the process with
//! status 1.

mod bridge;
mod config;
mod error;
mod log_writer;
mod logger;
#[cfg(test)]
mod test_utils;
mod utils;

pub use bridge::{LogBridge, init_log_bridge};
pub use config::{LoggerConfig, logger_config};
pub use error::{Error, Result};
pub use log_writer::{LogFile, MultiWriter};
pub use logger::Logger;
pub use utils::Severity;

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($method:ident; logger: $logger:expr, $fmt:literal, $($arg:tt)+) => {
        $logger.$method(::std::format_args!($fmt, $($arg)+))
    };
    ($method:ident; logger: $logger:expr, $message:expr $(,)?) => {
        $logger.$method($message)
    };
    ($method:ident; $fmt:literal, $($arg:tt)+) => {
        $crate::Logger::get().$method(::std::format_args!($fmt, $($arg)+))
    };
    ($method:ident; $message:expr $(,)?) => {
        $crate::Logger::get().$method($message)
    };
}

/// Logs a `DEBG` line. A single argument is printed verbatim, more go through `format_args!`.
///
/// `debug!(logger: &my_logger, ...)` targets a given logger instead of [`Logger::get`].
#[macro_export]
macro_rules! debug {
    ($($tokens:tt)+) => { $crate::__log!(debug; $($tokens)+) };
}

/// Logs a `NOTI` line.
#[macro_export]
macro_rules! notice {
    ($($tokens:tt)+) => { $crate::__log!(notice; $($tokens)+) };
}

/// Logs an `INFO` line.
#[macro_export]
macro_rules! info {
    ($($tokens:tt)+) => { $crate::__log!(info; $($tokens)+) };
}

/// Logs a `WARN` line.
#[macro_export]
macro_rules! warning {
    ($($tokens:tt)+) => { $crate::__log!(warning; $($tokens)+) };
}

/// Logs an `ERR ` line.
#[macro_export]
macro_rules! error {
    ($($tokens:tt)+) => { $crate::__log!(error; $($tokens)+) };
}

/// Logs a `CRIT` line, then exits the process. See [`Logger::critical`].
#[macro_export]
macro_rules! critical {
    ($($tokens:tt)+) => { $crate::__log!(critical; $($tokens)+) };
}
