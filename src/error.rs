use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum EdnError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Reader(#[from] ReaderError),
}

impl EdnError {
    /// Byte offset the failure was detected at, for log messages.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            EdnError::Reader(e) => e.offset(),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ReaderError {
    #[error("Unterminated literal")]
    #[diagnostic(
        code(reader::unterminated_literal),
        help("A string, character, or `#` form started here but the input ended before its terminator.")
    )]
    UnterminatedLiteral {
        #[source_code]
        src: NamedSource<String>,
        #[label("literal starts here")]
        span: SourceSpan,
    },

    #[error("Unterminated collection")]
    #[diagnostic(
        code(reader::unterminated_collection),
        help("The input ended before the closing delimiter of this collection was found.")
    )]
    UnterminatedCollection {
        #[source_code]
        src: NamedSource<String>,
        #[label("collection opened here")]
        span: SourceSpan,
    },

    #[error("Odd number of map entries")]
    #[diagnostic(
        code(reader::odd_map_entries),
        help("Map literals alternate keys and values; this key has no value.")
    )]
    OddMapEntries {
        #[source_code]
        src: NamedSource<String>,
        #[label("this key has no value")]
        span: SourceSpan,
    },

    #[error("Malformed input")]
    #[diagnostic(
        code(reader::malformed_input),
        help("The reader found syntax it does not support at this position.")
    )]
    MalformedInput {
        #[source_code]
        src: NamedSource<String>,
        #[label("{detail}")]
        span: SourceSpan,
        detail: String,
    },
}

impl ReaderError {
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ReaderError::UnterminatedLiteral { span, .. }
            | ReaderError::UnterminatedCollection { span, .. }
            | ReaderError::OddMapEntries { span, .. }
            | ReaderError::MalformedInput { span, .. } => span.offset(),
        }
    }
}
