use chrono::Local;
use std::fmt;

/// Set to `0` to silence runtime log lines.
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

pub fn log(level: Level, args: fmt::Arguments) {
    if std::env::var(LOG_ENV).is_ok_and(|v| v == "0") {
        return;
    }
    match level {
        Level::Error => eprintln!("{}", format_line(level, args)),
        _ => println!("{}", format_line(level, args)),
    }
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
