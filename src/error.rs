use thiserror::Error;

/// Failures raised by the conversion-API integration. Exactly one kind
/// exists today: the outbound send failing. It is routed to an [`ErrorSink`]
/// rather than propagated, so storefront requests never fail because of
/// analytics plumbing.
#[derive(Debug, Error)]
pub enum ConversionApiError {
    #[error("failed to send conversion API event")]
    SendEvent {
        #[source]
        source: anyhow::Error,
    },
}

/// Destination for errors the forwarder swallows. `fatal` is advisory:
/// everything this crate reports is non-fatal.
pub trait ErrorSink: Send + Sync {
    fn handle(&self, error: ConversionApiError, fatal: bool);
}

/// Default sink: emit a structured log record and move on.
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn handle(&self, error: ConversionApiError, fatal: bool) {
        tracing::error!(%error, fatal, "conversion API error");
    }
}
