use chrono::Local;
use std::fmt;

/// Shared with the runtime logger, `0` silences expansion log lines too.
pub const LOG_ENV: &str = "SQLBIT_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => f.write_str("INFO"),
            Level::Warn => f.write_str("WARN"),
            Level::Error => f.write_str("ERROR"),
        }
    }
}

pub fn format_line(level: Level, args: fmt::Arguments) -> String {
    format!("[{}] {} sqlbit: {}", Local::now().format("%Y-%m-%d %H:%M:%S"), level, args)
}

/// Always stderr, stdout of a proc macro is not shown by cargo.
pub fn log(level: Level, args: fmt::Arguments) {
    if std::env::var(LOG_ENV).is_ok_and(|v| v == "0") {
        return;
    }
    eprintln!("{}", format_line(level, args));
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Error, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_match_runtime_format() {
        let line = format_line(Level::Error, format_args!("`{}` is private", "secret"));
        assert!(line.starts_with('['));
        assert!(line.ends_with("] ERROR sqlbit: `secret` is private"));
        assert_eq!(Level::Info.to_string(), "INFO");
    }
}
