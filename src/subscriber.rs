//! tracing-subscriber integration
//!
//! Plugs [`SqlLogFormatter`] into `tracing_subscriber::fmt` so a logger
//! dedicated to SQL statements renders through the enrichment pipeline.

use std::fmt::{
    self,
    Write as _,
};

use thiserror::Error;
use tracing::{
    Event,
    Subscriber,
    field::{
        Field,
        Visit,
    },
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{
            self,
            FormatEvent,
            FormatFields,
        },
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::{
    config::{
        ConfigError,
        SqlFormatConfig,
    },
    formatter::SqlLogFormatter,
    record::{
        Formatter,
        LogRecord,
    },
};

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to install global subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Extracts the `message` field from an event.
///
/// The message arrives as `fmt::Arguments` through `record_debug`, whose
/// Debug output is the plain text.
struct MessageVisitor<'a> {
    message: &'a mut String,
}

impl Visit for MessageVisitor<'_> {
    fn record_debug(
        &mut self,
        field: &Field,
        value: &dyn fmt::Debug,
    ) {
        if field.name() == "message" {
            *self.message = format!("{:?}", value);
        }
    }

    fn record_str(
        &mut self,
        field: &Field,
        value: &str,
    ) {
        if field.name() == "message" {
            *self.message = value.to_string();
        }
    }
}

/// Event formatter wrapping [`SqlLogFormatter`].
///
/// Builds a [`LogRecord`] from each event's message, level and target,
/// runs it through the enrichment pipeline, and writes the finished
/// line.
pub struct SqlEventFormat {
    formatter: SqlLogFormatter,
}

impl SqlEventFormat {
    pub fn new(config: &SqlFormatConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: SqlLogFormatter::from_config(config)?,
        })
    }
}

impl From<SqlLogFormatter> for SqlEventFormat {
    fn from(formatter: SqlLogFormatter) -> Self {
        Self { formatter }
    }
}

impl<S, N> FormatEvent<S, N> for SqlEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        event.record(&mut MessageVisitor {
            message: &mut message,
        });

        let mut record = LogRecord::new(
            message,
            *event.metadata().level(),
            event.metadata().target(),
        );

        // delegate failures abort emission of this line
        let line = self
            .formatter
            .format(&mut record)
            .map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Install a global subscriber rendering every event through the SQL
/// formatter. Filter directives come from `RUST_LOG`, defaulting to
/// `info`.
pub fn try_init(config: &SqlFormatConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = tracing_subscriber::fmt::layer()
        .event_format(SqlEventFormat::new(config)?);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}
