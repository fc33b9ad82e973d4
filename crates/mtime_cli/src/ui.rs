//! UI helpers for consistent output formatting.

use mtime_core::ApplySummary;

/// Single-character Unicode glyphs used as status indicators.
pub mod indicators {
    /// Error indicator (✖).
    pub const ERROR: &str = "✖";
    /// Warning indicator (⚠).
    pub const WARNING: &str = "⚠";
    /// Success indicator (✓).
    pub const SUCCESS: &str = "✓";
}

/// Semantic colour palette for terminal output.
pub mod colors {
    use console::Style;

    /// Red - errors.
    pub const fn error() -> Style {
        Style::new().red()
    }

    /// Yellow - warnings and unresolved files.
    pub const fn warning() -> Style {
        Style::new().yellow()
    }

    /// Green - success messages.
    pub const fn success() -> Style {
        Style::new().green()
    }

    /// Light grey - secondary descriptive text.
    pub const fn secondary() -> Style {
        Style::new().color256(252)
    }

    /// Dark grey - muted/contextual text.
    pub const fn muted() -> Style {
        Style::new().color256(243)
    }

    /// Cyan - accent highlights (commands, links).
    pub const fn accent() -> Style {
        Style::new().cyan()
    }
}

/// Process exit codes.
pub mod exit {
    /// An unrecoverable error occurred.
    pub const ERROR: i32 = 2;
}

/// Prints a red error message to stderr.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        colors::error().apply_to(indicators::ERROR),
        colors::secondary().apply_to(message)
    );
}

/// Prints a yellow warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        colors::warning().apply_to(indicators::WARNING),
        colors::secondary().apply_to(message)
    );
}

/// Prints the one-line result of a run (e.g. "✓ 3 files · 2 directories").
pub fn print_summary(summary: &ApplySummary, unresolved: usize) {
    println!(
        "{} {}",
        colors::success().apply_to(indicators::SUCCESS),
        format_summary(summary, unresolved)
    );
}

fn format_summary(summary: &ApplySummary, unresolved: usize) -> String {
    let mut parts = vec![
        format_count(summary.files, pluralise_word(summary.files, "file", "files")),
        format_count(
            summary.directories,
            pluralise_word(summary.directories, "directory", "directories"),
        ),
    ];

    if unresolved > 0 {
        parts.push(format!(
            "{} {}",
            colors::warning().apply_to(unresolved),
            colors::muted().apply_to("unresolved")
        ));
    }

    parts.join(" · ")
}

fn format_count(count: usize, label: &str) -> String {
    format!(
        "{} {}",
        colors::secondary().apply_to(count),
        colors::muted().apply_to(label)
    )
}

/// Returns `singular` when `count` is 1, otherwise `plural`.
#[must_use]
pub const fn pluralise_word<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Returns the clap colour theme used for the usage text.
#[must_use]
pub fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{AnsiColor, Effects, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Cyan.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::BrightBlack.into())))
        .error(
            Style::new()
                .fg_color(Some(AnsiColor::Red.into()))
                .effects(Effects::BOLD),
        )
}
