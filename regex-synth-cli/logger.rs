// A minimal logger for the `log` crate. All we need is a level prefix and a
// line on stderr, so this avoids a dependency for it.

use log::{self, Log};

/// Logs every record it is given to stderr.
///
/// This logger does no filtering of its own. It relies on the global max
/// level set via `log::set_max_level`.
#[derive(Debug)]
pub struct Logger(());

const LOGGER: &Logger = &Logger(());

impl Logger {
    /// Install this logger as the global logger. This fails if a logger was
    /// already installed.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        match record.line() {
            Some(line) => eprintln!(
                "{}|{}:{}: {}",
                record.level(),
                record.target(),
                line,
                record.args()
            ),
            None => eprintln!(
                "{}|{}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
        }
    }

    fn flush(&self) {
        // eprintln! is unbuffered.
    }
}
