//! Centralized UI formatting and color utilities
//!
//! This module provides a unified interface for status colors, icons, and
//! formatting patterns used throughout the surveyor CLI.

use colored::{ColoredString, Colorize};

use crate::diagnostic::Severity;

/// Check if quiet mode is enabled via the SURVEYOR_QUIET environment variable
pub fn is_quiet() -> bool {
    std::env::var("SURVEYOR_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored icon for a diagnostic severity.
///
/// Icons:
/// - Warning: ⚠ (yellow)
/// - Error: ✗ (red)
pub fn severity_icon(severity: Severity) -> ColoredString {
    match severity {
        Severity::Warning => "⚠".yellow(),
        Severity::Error => "✗".red(),
    }
}

/// Returns ✓ (green) for a passed check and ✗ (red) for a failed one.
pub fn verdict_icon(passed: bool) -> ColoredString {
    if passed {
        "✓".green()
    } else {
        "✗".red()
    }
}

/// Color scheme for report text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for advisories
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (survey ids, rule names, paths)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }

    /// Underline for a section title, as wide as the title
    pub fn underline(title: &str) -> String {
        separator(title.chars().count())
    }
}
