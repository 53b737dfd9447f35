//! Error types for grammar loading.

use thiserror::Error;

/// Problems encountered while loading a rule source.
///
/// Only [`GrammarError::SourceUnavailable`] is ever returned as an `Err`.
/// Line-level problems such as [`GrammarError::MalformedAngle`] are recovered
/// from and collected in [`LoadReport::warnings`](crate::LoadReport).
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The rule source could not be opened or read.
    #[error("rule source {origin} is unavailable: {source}")]
    SourceUnavailable {
        /// File path, or a caller-supplied label for non-file sources.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An `angle:` line whose value is not a floating-point number.
    #[error("line {line}: cannot parse angle value {value:?}")]
    MalformedAngle {
        /// 1-based line number inside the source.
        line: usize,
        /// The raw text after the `angle:` prefix.
        value: String,
    },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
