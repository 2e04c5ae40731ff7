//! Internal failure reporting

use crate::formatter::EnrichError;

/// Exception sink for enrichment failures.
///
/// Enrichment is best-effort: failures land here and the record is
/// still emitted with whatever enrichment completed.
pub trait ErrorSink {
    fn report(
        &self,
        error: &EnrichError,
    );
}

/// Default sink: reports through the logging framework itself, under
/// this crate's target so consumers can filter it out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(
        &self,
        error: &EnrichError,
    ) {
        tracing::error!(
            target: "sql_log_format::enrich",
            %error,
            "log enrichment failed"
        );
    }
}
