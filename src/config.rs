//! Construction-time configuration
//!
//! Options are fixed once a formatter is built from them; the color
//! cycle's cursor is the only state that moves afterwards.

use std::{
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::{
    record::{
        DEFAULT_DATEFMT,
        DEFAULT_FMT,
    },
    stack::DEFAULT_OMISSIONS,
};

fn default_true() -> bool {
    true
}

fn default_fmt() -> String {
    DEFAULT_FMT.to_string()
}

fn default_datefmt() -> String {
    DEFAULT_DATEFMT.to_string()
}

fn default_colorcycle() -> Vec<String> {
    ["red", "green", "yellow", "blue", "magenta", "cyan"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_omit() -> Vec<String> {
    DEFAULT_OMISSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_indent() -> u8 {
    2
}

fn default_lines_between() -> u8 {
    1
}

/// Errors building a formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown color name '{0}' in colorcycle")]
    UnknownColor(String),
}

/// Style options handed to the SQL pretty-printer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlStyleConfig {
    /// Indentation width for reindented statements
    #[serde(default = "default_indent")]
    pub indent_spaces: u8,
    /// Upper-case SQL keywords (SELECT, FROM, ...)
    #[serde(default = "default_true")]
    pub uppercase_keywords: bool,
    /// Blank lines between statements in a multi-statement message
    #[serde(default = "default_lines_between")]
    pub lines_between_queries: u8,
}

impl Default for SqlStyleConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            uppercase_keywords: true,
            lines_between_queries: 1,
        }
    }
}

/// Configuration for [`SqlLogFormatter`](crate::SqlLogFormatter).
///
/// Example file format:
/// ```toml
/// fmt = "{timestamp} {level} {target} - {message}"
/// datefmt = "%Y-%m-%d %H:%M:%S"
/// colorcycle = ["red", "green"]
/// include_stack_info = true
/// omit = ["tokio::runtime", "/rustc/"]
///
/// [sql]
/// indent_spaces = 2
/// uppercase_keywords = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlFormatConfig {
    /// Output line template for the base formatter
    #[serde(default = "default_fmt")]
    pub fmt: String,
    /// strftime template for `{timestamp}`
    #[serde(default = "default_datefmt")]
    pub datefmt: String,
    /// Ordered color names assigned round-robin to successive
    /// statements; empty disables colorization
    #[serde(default = "default_colorcycle")]
    pub colorcycle: Vec<String>,
    /// Prepend a filtered call-stack trace to each message
    #[serde(default = "default_true")]
    pub include_stack_info: bool,
    /// Substrings that drop a stack-frame line when contained in it
    #[serde(default = "default_omit")]
    pub omit: Vec<String>,
    /// SQL reformatting style
    #[serde(default)]
    pub sql: SqlStyleConfig,
}

impl Default for SqlFormatConfig {
    fn default() -> Self {
        Self {
            fmt: default_fmt(),
            datefmt: default_datefmt(),
            colorcycle: default_colorcycle(),
            include_stack_info: true,
            omit: default_omit(),
            sql: SqlStyleConfig::default(),
        }
    }
}

impl SqlFormatConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: in TOML, top-level keys must appear before the `[sql]`
    /// section header.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }

    /// Set the output line template
    pub fn with_fmt(
        mut self,
        fmt: impl Into<String>,
    ) -> Self {
        self.fmt = fmt.into();
        self
    }

    /// Set the `{timestamp}` strftime template
    pub fn with_datefmt(
        mut self,
        datefmt: impl Into<String>,
    ) -> Self {
        self.datefmt = datefmt.into();
        self
    }

    /// Set the color rotation; an empty list disables colorization
    pub fn with_colorcycle<I, S>(
        mut self,
        colors: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colorcycle = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Enable/disable stack-trace annotation
    pub fn stack_info(
        mut self,
        enabled: bool,
    ) -> Self {
        self.include_stack_info = enabled;
        self
    }

    /// Replace the omission list used to filter stack-frame lines
    pub fn with_omit<I, S>(
        mut self,
        omit: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit = omit.into_iter().map(Into::into).collect();
        self
    }

    /// Set the SQL reformatting style
    pub fn with_sql_style(
        mut self,
        sql: SqlStyleConfig,
    ) -> Self {
        self.sql = sql;
        self
    }
}
