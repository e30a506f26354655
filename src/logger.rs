use std::{
    fmt::Display,
    io::{self, Write},
    path::Path,
    process,
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
    thread,
    time::Duration,
};

use crate::{
    error::Result,
    log_writer::{LogFile, MultiWriter},
    utils::{Severity, format_line, paint_line},
};

/// Pause after the critical message, before the countdown starts.
const CRITICAL_FLUSH_PAUSE: Duration = Duration::from_millis(100);
const COUNTDOWN_SECONDS: u64 = 5;

/// Process-wide logger, created with the console enabled and no sink.
static GLOBAL_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

struct LoggerState {
    console_enabled: bool,
    console: Box<dyn Write + Send>,
    /// Never reset once set, only extended.
    sink: Option<MultiWriter>,
}

/// Leveled logger writing colored lines to the console and plain lines to its sink.
///
/// All configuration changes and all writes go through a single lock, so lines coming
/// from concurrent callers never interleave.
pub struct Logger {
    state: Mutex<LoggerState>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a standalone logger printing to stdout.
    pub fn new() -> Self {
        Self::with_console_writer(Box::new(io::stdout()))
    }

    pub(crate) fn with_console_writer(console: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                console_enabled: true,
                console,
                sink: None,
            }),
        }
    }

    /// Returns the process-wide logger.
    pub fn get() -> &'static Logger {
        &GLOBAL_LOGGER
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enable_console(&self) {
        self.lock().console_enabled = true;
    }

    pub fn disable_console(&self) {
        self.lock().console_enabled = false;
    }

    pub fn is_console_enabled(&self) -> bool {
        self.lock().console_enabled
    }

    pub(crate) fn set_console_writer(&self, console: Box<dyn Write + Send>) {
        self.lock().console = console;
    }

    /// Number of writers currently receiving every line.
    pub fn writer_count(&self) -> usize {
        self.lock().sink.as_ref().map_or(0, MultiWriter::len)
    }

    /// Adds a writer receiving a plain copy of every line, after the ones already registered.
    pub fn add_writer<W: Write + Send + 'static>(&self, writer: W) {
        self.add_boxed_writer(Box::new(writer));
    }

    /// Adds a writer if there is one. `None` leaves the logger untouched.
    pub fn maybe_add_writer<W: Write + Send + 'static>(&self, writer: Option<W>) {
        if let Some(writer) = writer {
            self.add_writer(writer);
        }
    }

    pub(crate) fn add_boxed_writer(&self, writer: Box<dyn Write + Send>) {
        self.lock()
            .sink
            .get_or_insert_with(MultiWriter::new)
            .push(writer);
    }

    /// Appends every line to the file at `path`, relative or absolute.
    ///
    /// Missing parent directories and the file itself are created. Existing content is kept.
    pub fn set_file_writer<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = LogFile::new(path)?;
        self.add_writer(file);
        Ok(())
    }

    /// Flushes the console and every writer, ignoring failures.
    pub fn flush(&self) {
        let mut state = self.lock();
        state.console.flush().ok();
        if let Some(sink) = state.sink.as_mut() {
            sink.flush().ok();
        }
    }

    pub(crate) fn out<M: Display + ?Sized>(&self, severity: Severity, message: &M) {
        {
            let state = self.lock();
            if !state.console_enabled && state.sink.is_none() {
                return;
            }
        }

        // formatted outside the lock
        let line = format_line(severity, message);

        let mut state = self.lock();
        if state.console_enabled {
            let painted = paint_line(severity, &line);
            state.console.write_all(painted.as_bytes()).ok();
            state.console.flush().ok();
        }
        if let Some(sink) = state.sink.as_mut() {
            sink.write_all(line.as_bytes()).ok();
        }
    }

    pub fn debug<M: Display>(&self, message: M) {
        self.out(Severity::Debug, &message);
    }

    pub fn notice<M: Display>(&self, message: M) {
        self.out(Severity::Notice, &message);
    }

    pub fn info<M: Display>(&self, message: M) {
        self.out(Severity::Info, &message);
    }

    pub fn warning<M: Display>(&self, message: M) {
        self.out(Severity::Warning, &message);
    }

    pub fn error<M: Display>(&self, message: M) {
        self.out(Severity::Error, &message);
    }

    /// Logs a critical message, counts down for about six seconds and exits with status 1.
    ///
    /// The countdown is blocking and cannot be interrupted. This never returns.
    pub fn critical<M: Display>(&self, message: M) -> ! {
        self.shutdown_sequence(&message, thread::sleep);
        self.flush();
        process::exit(1)
    }

    fn shutdown_sequence<M, F>(&self, message: &M, mut pause: F)
    where
        M: Display + ?Sized,
        F: FnMut(Duration),
    {
        self.out(Severity::Critical, message);
        pause(CRITICAL_FLUSH_PAUSE);
        self.warning("The program will exit in:");
        for remaining in (1..=COUNTDOWN_SECONDS).rev() {
            self.warning(format_args!("{remaining} seconds"));
            pause(Duration::from_secs(1));
        }
        self.info("Bye!");
        pause(Duration::from_secs(1));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use regex::Regex;

    use super::*;
    use crate::test_utils::{FailingWriter, SharedBuffer};

    fn silent_logger() -> (Logger, SharedBuffer) {
        let console = SharedBuffer::default();
        let logger = Logger::with_console_writer(Box::new(console.clone()));
        (logger, console)
    }

    fn messages(text: &str) -> Vec<&str> {
        text.lines()
            .map(|line| line.split_once("]: ").unwrap().1)
            .collect()
    }

    #[test]
    fn test_new_logger_defaults() {
        let (logger, _) = silent_logger();
        assert!(logger.is_console_enabled());
        assert_eq!(logger.writer_count(), 0);
    }

    #[test]
    fn test_console_toggle_is_idempotent() {
        let (logger, _) = silent_logger();
        logger.disable_console();
        logger.disable_console();
        assert!(!logger.is_console_enabled());
        logger.enable_console();
        logger.enable_console();
        assert!(logger.is_console_enabled());
    }

    #[test]
    fn test_no_destination_is_a_no_op() {
        let (logger, console) = silent_logger();
        logger.disable_console();
        logger.info("nobody listens");
        logger.error(format_args!("{}", 42));
        assert!(console.contents().is_empty());
    }

    #[test]
    fn test_console_receives_line_without_sink() {
        let (logger, console) = silent_logger();
        logger.debug("plain message");
        let output = console.contents();
        assert!(output.contains("[DEBG]: plain message"));
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_disabled_console_still_feeds_sink() {
        let (logger, console) = silent_logger();
        let sink = SharedBuffer::default();
        logger.add_writer(sink.clone());
        logger.disable_console();
        logger.notice("to the sink only");
        assert!(console.contents().is_empty());
        assert!(sink.contents().ends_with("[NOTI]: to the sink only\n"));
    }

    #[test]
    fn test_every_writer_gets_identical_bytes() {
        let (logger, _) = silent_logger();
        let buffers: Vec<SharedBuffer> = (0..3).map(|_| SharedBuffer::default()).collect();
        for buffer in &buffers {
            logger.add_writer(buffer.clone());
        }
        assert_eq!(logger.writer_count(), 3);

        logger.warning(format_args!("{} writers", 3));
        let expected = buffers[0].contents();
        assert!(expected.ends_with("[WARN]: 3 writers\n"));
        for buffer in &buffers[1..] {
            assert_eq!(buffer.contents(), expected);
        }
    }

    #[test]
    fn test_sink_lines_are_plain_and_terminated_once() {
        colored::control::set_override(true);
        let (logger, console) = silent_logger();
        let sink = SharedBuffer::default();
        logger.add_writer(sink.clone());

        logger.error("already terminated\n");
        logger.info("not terminated");

        let re = Regex::new(r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2} \[(ERR |INFO)\]: [a-z ]+\n$")
            .unwrap();
        let contents = sink.contents();
        for line in contents.split_inclusive('\n') {
            assert!(re.is_match(line), "unexpected line {line:?}");
        }
        assert_eq!(contents.matches('\n').count(), 2);
        assert!(!contents.contains('\x1b'));
        assert!(console.contents().contains("\x1b[91m"));
    }

    #[test]
    fn test_zero_argument_templates_are_verbatim() {
        let (logger, _) = silent_logger();
        let sink = SharedBuffer::default();
        logger.add_writer(sink.clone());
        logger.info("100% done, %s and {} stay as is");
        assert!(
            sink.contents()
                .ends_with("[INFO]: 100% done, %s and {} stay as is\n")
        );
    }

    #[test]
    fn test_maybe_add_writer_none_is_a_no_op() {
        let (logger, _) = silent_logger();
        logger.maybe_add_writer(None::<SharedBuffer>);
        assert_eq!(logger.writer_count(), 0);
        logger.maybe_add_writer(Some(SharedBuffer::default()));
        assert_eq!(logger.writer_count(), 1);
    }

    #[test]
    fn test_failing_writer_is_swallowed() {
        let (logger, _) = silent_logger();
        let healthy = SharedBuffer::default();
        logger.add_writer(FailingWriter);
        logger.add_writer(healthy.clone());
        logger.error("still delivered");
        logger.flush();
        assert!(healthy.contents().ends_with("[ERR ]: still delivered\n"));
    }

    #[test]
    fn test_set_file_writer_empty_path() {
        let (logger, _) = silent_logger();
        let err = logger.set_file_writer("").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidArgument(_)));
        assert_eq!(logger.writer_count(), 0);
    }

    #[test]
    fn test_set_file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("log.txt");

        let (first, _) = silent_logger();
        first.set_file_writer(&path).unwrap();
        first.info(format_args!("{}", "hello"));

        let (second, _) = silent_logger();
        second.set_file_writer(&path).unwrap();
        second.info("again");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(messages(&contents), ["hello", "again"]);
    }

    #[test]
    fn test_concurrent_lines_never_interleave() {
        let (logger, console) = silent_logger();
        let sink = SharedBuffer::default();
        logger.add_writer(sink.clone());
        let logger = Arc::new(logger);
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let logger = Arc::clone(&logger);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for j in 0..50 {
                        logger.info(format_args!("thread {i} message {j}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let re = Regex::new(r"^thread \d message \d+$").unwrap();
        let contents = sink.contents();
        let lines = messages(&contents);
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|line| re.is_match(line)));
        assert_eq!(console.contents().lines().count(), 400);
    }

    #[test]
    fn test_shutdown_sequence() {
        let (logger, _) = silent_logger();
        let sink = SharedBuffer::default();
        logger.add_writer(sink.clone());

        let mut pauses = Vec::new();
        logger.shutdown_sequence(&format_args!("{}", "fatal"), |d| pauses.push(d));

        let contents = sink.contents();
        let tags: Vec<_> = contents.lines().map(|line| &line[20..26]).collect();
        assert_eq!(
            tags,
            ["[CRIT]", "[WARN]", "[WARN]", "[WARN]", "[WARN]", "[WARN]", "[WARN]", "[INFO]"]
        );
        assert_eq!(
            messages(&contents),
            [
                "fatal",
                "The program will exit in:",
                "5 seconds",
                "4 seconds",
                "3 seconds",
                "2 seconds",
                "1 seconds",
                "Bye!",
            ]
        );
        assert_eq!(pauses.first(), Some(&Duration::from_millis(100)));
        assert_eq!(pauses.iter().sum::<Duration>(), Duration::from_millis(6_100));
    }
}
