//! The SQL log formatter

use colored::Colorize;
use thiserror::Error;

use crate::{
    color::ColorCycle,
    config::{
        ConfigError,
        SqlFormatConfig,
    },
    record::{
        BaseFormatter,
        FormatError,
        Formatter,
        LogRecord,
    },
    sink::{
        ErrorSink,
        TracingSink,
    },
    sql::{
        SqlFormat,
        SqlReformatter,
    },
    stack::{
        BacktraceSource,
        StackSource,
        filter_frames,
    },
};

/// Failure in one of the best-effort enrichment steps.
///
/// Never propagated out of [`SqlLogFormatter::format`]: reported to the
/// [`ErrorSink`] and the record is emitted with whatever enrichment
/// completed.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("sql reformat failed: {0}")]
    Reformat(String),
    #[error("stack capture failed: {0}")]
    Stack(String),
}

/// Pretty-print SQL log messages and show where they were generated.
///
/// Wraps an injected base [`Formatter`] and, before delegating to it,
/// mutates the record's message in place:
///
/// - reformats it with the SQL pretty-printer
/// - colors each successive statement with the next cycle color
/// - prepends a stack trace filtered through the omission list
pub struct SqlLogFormatter<B = BaseFormatter> {
    base: B,
    reformatter: Box<dyn SqlReformatter + Send + Sync>,
    colors: Option<ColorCycle>,
    include_stack_info: bool,
    omit: Vec<String>,
    stack: Box<dyn StackSource + Send + Sync>,
    sink: Box<dyn ErrorSink + Send + Sync>,
}

impl SqlLogFormatter<BaseFormatter> {
    /// Build around the standard base formatter, validating color names
    /// up front.
    pub fn from_config(config: &SqlFormatConfig) -> Result<Self, ConfigError> {
        let base = BaseFormatter::new(&config.fmt, &config.datefmt);
        Self::wrapping(base, config)
    }
}

impl<B: Formatter> SqlLogFormatter<B> {
    /// Wrap an explicit base formatter with the default collaborators.
    pub fn wrapping(
        base: B,
        config: &SqlFormatConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base,
            reformatter: Box::new(SqlFormat::new(&config.sql)),
            colors: ColorCycle::from_names(&config.colorcycle)?,
            include_stack_info: config.include_stack_info,
            omit: config.omit.clone(),
            stack: Box::new(BacktraceSource),
            sink: Box::new(TracingSink),
        })
    }

    /// Substitute the SQL pretty-printer.
    pub fn with_reformatter(
        mut self,
        reformatter: impl SqlReformatter + Send + Sync + 'static,
    ) -> Self {
        self.reformatter = Box::new(reformatter);
        self
    }

    /// Substitute the stack-capture source.
    pub fn with_stack_source(
        mut self,
        stack: impl StackSource + Send + Sync + 'static,
    ) -> Self {
        self.stack = Box::new(stack);
        self
    }

    /// Substitute the sink receiving enrichment failures.
    pub fn with_error_sink(
        mut self,
        sink: impl ErrorSink + Send + Sync + 'static,
    ) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Reformat, colorize, stack-annotate. The first failure aborts the
    /// remaining steps but keeps the mutations made so far.
    fn enrich(
        &self,
        record: &mut LogRecord,
    ) -> Result<(), EnrichError> {
        record.message = self.reformatter.reformat(&record.message)?;

        if let Some(cycle) = &self.colors {
            record.message = record
                .message
                .as_str()
                .color(cycle.next_color())
                .to_string();
        }

        if self.include_stack_info {
            let frames = self.stack.capture();
            let trace = filter_frames(&frames, &self.omit);
            record.message = format!("\n{}\n{}", trace, record.message);
        }

        Ok(())
    }
}

impl<B: Formatter> Formatter for SqlLogFormatter<B> {
    fn format(
        &self,
        record: &mut LogRecord,
    ) -> Result<String, FormatError> {
        if let Err(error) = self.enrich(record) {
            self.sink.report(&error);
        }
        self.base.format(record)
    }
}
