//! Browser console logging.
//!
//! Routes the `log` facade to `console.*` so engine diagnostics show up in the
//! developer tools of the page hosting the visualization.

use std::str::FromStr;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::error::{Error, Result};

/// Level used until the host page asks for something else.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// `log` backend writing to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger and set the maximum level.
///
/// Installing twice is harmless; only the level changes.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

/// Parse a level name (`"off"`, `"error"`, ..., `"trace"`) and apply it.
pub fn set_level(name: &str) -> Result<LevelFilter> {
    let level = parse_level(name)?;
    log::set_max_level(level);
    Ok(level)
}

fn parse_level(name: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(name.trim()).map_err(|_| Error::LogLevel(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level: loud");
    }
}
