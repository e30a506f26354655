use log::{LevelFilter, Log, Metadata, Record};

use crate::{error::Result, logger::Logger, utils::Severity};

/// Forwards `log` records to [`Logger::get`].
///
/// Levels map onto severities (trace shares the debug tag). Records are never filtered and
/// never terminate the process.
pub struct LogBridge;

static LOG_BRIDGE: LogBridge = LogBridge;

impl Log for LogBridge {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        Logger::get().out(Severity::from(record.level()), record.args());
    }

    fn flush(&self) {
        Logger::get().flush();
    }
}

/// Installs [`LogBridge`] as the `log` backend, with every level enabled.
pub fn init_log_bridge() -> Result<()> {
    log::set_logger(&LOG_BRIDGE)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
