//! SQL reformatting step

use sqlformat::{
    FormatOptions,
    Indent,
    QueryParams,
};

use crate::{
    config::SqlStyleConfig,
    formatter::EnrichError,
};

/// Pure reformatting contract: reindent a statement and normalize its
/// keyword casing.
///
/// Malformed input is the implementation's problem; the default one
/// reformats best-effort and never fails.
pub trait SqlReformatter {
    fn reformat(
        &self,
        sql: &str,
    ) -> Result<String, EnrichError>;
}

/// Default reformatter backed by the `sqlformat` crate.
#[derive(Debug, Clone)]
pub struct SqlFormat {
    options: FormatOptions,
}

impl SqlFormat {
    pub fn new(style: &SqlStyleConfig) -> Self {
        Self {
            options: FormatOptions {
                indent: Indent::Spaces(style.indent_spaces),
                uppercase: style.uppercase_keywords,
                lines_between_queries: style.lines_between_queries,
            },
        }
    }
}

impl Default for SqlFormat {
    fn default() -> Self {
        Self::new(&SqlStyleConfig::default())
    }
}

impl SqlReformatter for SqlFormat {
    fn reformat(
        &self,
        sql: &str,
    ) -> Result<String, EnrichError> {
        Ok(sqlformat::format(sql, &QueryParams::None, self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reindents_and_uppercases_keywords() {
        let reformatted = SqlFormat::default()
            .reformat("select * from foo where id = 1")
            .unwrap();

        assert!(reformatted.starts_with("SELECT"));
        assert!(reformatted.contains("\nFROM"));
        assert!(reformatted.contains("\nWHERE"));
        assert!(reformatted.contains("foo"));
        assert!(reformatted.contains("id = 1"));
    }

    #[test]
    fn keyword_case_can_be_preserved() {
        let style = SqlStyleConfig {
            uppercase_keywords: false,
            ..SqlStyleConfig::default()
        };

        let reformatted = SqlFormat::new(&style)
            .reformat("select id from foo")
            .unwrap();

        assert!(reformatted.contains("select"));
        assert!(!reformatted.contains("SELECT"));
    }

    #[test]
    fn non_sql_input_passes_through_best_effort() {
        let reformatted =
            SqlFormat::default().reformat("not sql at all").unwrap();

        assert!(!reformatted.is_empty());
    }
}
