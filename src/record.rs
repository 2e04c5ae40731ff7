//! Log record model and the base line formatter

use std::{
    fmt::Write as _,
    time::SystemTime,
};

use chrono::{
    DateTime,
    Local,
};
use thiserror::Error;
use tracing::Level;

pub(crate) const DEFAULT_FMT: &str = "{timestamp} {level} {target} - {message}";
pub(crate) const DEFAULT_DATEFMT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors from the base formatting delegate.
///
/// These are outside the enrichment pipeline and propagate to the caller
/// instead of being suppressed.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown placeholder '{{{0}}}' in format template")]
    UnknownPlaceholder(String),
    #[error("unclosed '{{' in format template")]
    UnclosedPlaceholder,
    #[error("invalid date format '{0}'")]
    Timestamp(String),
}

/// One logging call passing through the pipeline.
///
/// Owned by the host framework. Formatters mutate `message` in place and
/// leave the remaining fields untouched.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub message: String,
    pub level: Level,
    pub target: String,
    pub timestamp: SystemTime,
}

impl LogRecord {
    pub fn new(
        message: impl Into<String>,
        level: Level,
        target: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            target: target.into(),
            timestamp: SystemTime::now(),
        }
    }
}

/// Capability to render a record into its final output line.
pub trait Formatter {
    fn format(
        &self,
        record: &mut LogRecord,
    ) -> Result<String, FormatError>;
}

/// Standard formatter: interpolates record fields into a line template.
///
/// Recognized placeholders are `{timestamp}`, `{level}`, `{target}` and
/// `{message}`; `{{` and `}}` escape literal braces. Timestamps render
/// through the strftime `datefmt` template.
#[derive(Debug, Clone)]
pub struct BaseFormatter {
    fmt: String,
    datefmt: String,
}

impl BaseFormatter {
    pub fn new(
        fmt: impl Into<String>,
        datefmt: impl Into<String>,
    ) -> Self {
        Self {
            fmt: fmt.into(),
            datefmt: datefmt.into(),
        }
    }

    fn render_timestamp(
        &self,
        timestamp: SystemTime,
    ) -> Result<String, FormatError> {
        let local: DateTime<Local> = timestamp.into();
        let mut out = String::new();
        // DelayedFormat's Display errors on malformed strftime items;
        // surface that as a template error instead of panicking in
        // to_string()
        write!(out, "{}", local.format(&self.datefmt))
            .map_err(|_| FormatError::Timestamp(self.datefmt.clone()))?;
        Ok(out)
    }
}

impl Default for BaseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_FMT, DEFAULT_DATEFMT)
    }
}

impl Formatter for BaseFormatter {
    fn format(
        &self,
        record: &mut LogRecord,
    ) -> Result<String, FormatError> {
        let mut out =
            String::with_capacity(self.fmt.len() + record.message.len());
        let mut chars = self.fmt.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                },
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None =>
                                return Err(FormatError::UnclosedPlaceholder),
                        }
                    }
                    match name.as_str() {
                        "timestamp" => out.push_str(
                            &self.render_timestamp(record.timestamp)?,
                        ),
                        "level" => {
                            // Right-align to the widest level name so
                            // columns line up ("ERROR" vs " INFO")
                            let _ = write!(out, "{:>5}", record.level);
                        },
                        "target" => out.push_str(&record.target),
                        "message" => out.push_str(&record.message),
                        _ =>
                            return Err(FormatError::UnknownPlaceholder(name)),
                    }
                },
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                },
                _ => out.push(ch),
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interpolates_record_fields() {
        let base = BaseFormatter::new("{level} {target} - {message}", "");
        let mut record =
            LogRecord::new("hello", Level::INFO, "app::sql");

        let line = base.format(&mut record).unwrap();

        assert_eq!(line, " INFO app::sql - hello");
    }

    #[test]
    fn renders_timestamp_with_datefmt() {
        let base = BaseFormatter::new("{timestamp}|{message}", "%Y");
        let mut record = LogRecord::new("x", Level::INFO, "t");

        let line = base.format(&mut record).unwrap();
        let (year, rest) = line.split_once('|').unwrap();

        assert_eq!(rest, "x");
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn escaped_braces_are_literal() {
        let base = BaseFormatter::new("{{{message}}}", "");
        let mut record = LogRecord::new("m", Level::INFO, "t");

        assert_eq!(base.format(&mut record).unwrap(), "{m}");
    }

    #[test]
    fn unknown_placeholder_is_a_delegate_failure() {
        let base = BaseFormatter::new("{nope}", "");
        let mut record = LogRecord::new("m", Level::INFO, "t");

        assert!(matches!(
            base.format(&mut record),
            Err(FormatError::UnknownPlaceholder(name)) if name == "nope"
        ));
    }

    #[test]
    fn unclosed_placeholder_is_a_delegate_failure() {
        let base = BaseFormatter::new("{message", "");
        let mut record = LogRecord::new("m", Level::INFO, "t");

        assert!(matches!(
            base.format(&mut record),
            Err(FormatError::UnclosedPlaceholder)
        ));
    }

    #[test]
    fn invalid_datefmt_is_a_delegate_failure() {
        let base = BaseFormatter::new("{timestamp}", "%");
        let mut record = LogRecord::new("m", Level::INFO, "t");

        assert!(matches!(
            base.format(&mut record),
            Err(FormatError::Timestamp(_))
        ));
    }
}
