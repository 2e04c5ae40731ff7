//! Call-stack capture and omission filtering

use std::backtrace::Backtrace;

use itertools::Itertools;

/// Frame lines dropped from captured stacks by default.
///
/// Targets ORM internals, the logging machinery itself, runtime and
/// thread scaffolding, and this crate's own capture point
/// (`sql_log_format::stack::`).
pub const DEFAULT_OMISSIONS: &[&str] = &[
    "sqlx::",
    "sea_orm::",
    "diesel::",
    "tracing_core::",
    "tracing_subscriber::",
    "tokio::runtime",
    "std::thread::",
    "std::rt::",
    "std::backtrace",
    "__rust_begin_short_backtrace",
    "/rustc/",
    "sql_log_format::stack::",
];

/// Capability to capture the current call stack as an ordered sequence
/// of human-readable frame lines.
///
/// Pluggable so tests can substitute a deterministic source.
pub trait StackSource {
    fn capture(&self) -> Vec<String>;
}

/// Default source backed by `std::backtrace`.
///
/// Frames come out innermost first; that order is preserved downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceSource;

impl StackSource for BacktraceSource {
    fn capture(&self) -> Vec<String> {
        // force_capture: stack annotation is opted into via config, not
        // via RUST_BACKTRACE
        let backtrace = Backtrace::force_capture();
        backtrace
            .to_string()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Drop every frame line containing any omission substring; survivors
/// keep their capture order.
pub(crate) fn filter_frames(
    frames: &[String],
    omit: &[String],
) -> String {
    frames
        .iter()
        .filter(|frame| !omit.iter().any(|o| frame.contains(o.as_str())))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frames(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn matching_lines_are_dropped_in_place() {
        let captured = frames(&[
            "0: app::repo::load_user",
            "1: worker threading.py glue",
            "2: app::main",
        ]);
        let omit = vec!["threading.py".to_string()];

        let filtered = filter_frames(&captured, &omit);

        assert_eq!(
            filtered,
            "0: app::repo::load_user\n2: app::main"
        );
    }

    #[test]
    fn surviving_frames_keep_capture_order() {
        let captured = frames(&["inner", "middle", "outer"]);

        let filtered = filter_frames(&captured, &[]);

        let inner = filtered.find("inner").unwrap();
        let outer = filtered.find("outer").unwrap();
        assert!(inner < outer);
    }

    #[test]
    fn empty_omission_list_keeps_everything() {
        let captured = frames(&["a", "b"]);

        assert_eq!(filter_frames(&captured, &[]), "a\nb");
    }

    #[test]
    fn backtrace_source_captures_frames() {
        let captured = BacktraceSource.capture();

        assert!(!captured.is_empty());
    }

    #[test]
    fn default_omissions_hide_the_capture_point() {
        let captured = BacktraceSource.capture();
        let omit: Vec<String> =
            DEFAULT_OMISSIONS.iter().map(|s| s.to_string()).collect();

        let filtered = filter_frames(&captured, &omit);

        assert!(!filtered.contains("sql_log_format::stack::"));
    }
}
