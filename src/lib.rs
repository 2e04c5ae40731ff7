//! A logging formatter for SQL statements
//!
//! Intended for loggers that write out SQL queries. The formatter will:
//!
//! - reformat each query to be much more readable
//! - print each successive query in a different color
//! - include stack information showing where the query was initiated
//! - filter noisy frames out of that stack
//!
//! All of it is best-effort enrichment: if a step fails, the failure is
//! reported through an [`ErrorSink`] and the record is still emitted.
//!
//! # Examples
//!
//! ```no_run
//! use sql_log_format::{SqlFormatConfig, subscriber};
//!
//! let config = SqlFormatConfig::default()
//!     .with_colorcycle(["red", "green"])
//!     .stack_info(true);
//! subscriber::try_init(&config).expect("install subscriber");
//!
//! tracing::info!(target: "app::sql", "select * from users where id = 1");
//! ```

pub mod color;
pub mod config;
pub mod formatter;
pub mod record;
pub mod sink;
pub mod sql;
pub mod stack;
pub mod subscriber;

pub use color::ColorCycle;
pub use config::{
    ConfigError,
    SqlFormatConfig,
    SqlStyleConfig,
};
pub use formatter::{
    EnrichError,
    SqlLogFormatter,
};
pub use record::{
    BaseFormatter,
    FormatError,
    Formatter,
    LogRecord,
};
pub use sink::{
    ErrorSink,
    TracingSink,
};
pub use sql::{
    SqlFormat,
    SqlReformatter,
};
pub use stack::{
    BacktraceSource,
    DEFAULT_OMISSIONS,
    StackSource,
};
pub use subscriber::{
    InitError,
    SqlEventFormat,
};
