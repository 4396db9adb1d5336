//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for category names
    pub fn category(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}
