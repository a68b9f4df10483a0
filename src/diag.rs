//! Diagnostics on standard error.
//!
//! Standard output carries only the `Produced:` / `Consumed:` lines, so every
//! status message goes through here instead.

use colored::Colorize;

pub fn info(message: impl AsRef<str>) {
    eprintln!("{} {}", "[INFO]".cyan(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "[WARN]".yellow(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "[ERROR]".bold().red(), message.as_ref());
}
