//! Error types for grammar loading, random access and analysis.

use crate::symbol::SymbolId;
use std::path::PathBuf;

/// Errors produced while loading or querying a RePair grammar.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An input file does not exist.
    #[error("input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Reading an input file failed for a reason other than absence.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing query results failed.
    #[error("failed to write results: {0}")]
    Write(#[source] std::io::Error),

    /// Declared sizes disagree with the bytes actually present.
    #[error("truncated {what}: expected {expected} bytes, found {found}")]
    Truncated {
        what: &'static str,
        expected: u64,
        found: u64,
    },

    /// A grammar without a character map declared more terminals than bytes exist.
    #[error("alphabet of {alphabet_size} symbols cannot map terminals onto bytes")]
    AlphabetTooLarge { alphabet_size: u32 },

    /// A rule references a child that is not strictly older than itself.
    #[error("rule {rule} references symbol {child}, which is not defined before it")]
    InvalidRule { rule: SymbolId, child: SymbolId },

    /// The symbol count does not fit the 32-bit id space.
    #[error("grammar defines {count} symbols, more than 32-bit ids can address")]
    TooManySymbols { count: u64 },

    /// A rule expands to more characters than a 64-bit length can hold.
    #[error("expansion length of rule {rule} overflows")]
    LengthOverflow { rule: SymbolId },

    /// A length table was paired with a grammar it was not derived from.
    #[error("length table has {found} entries but the grammar defines {expected} symbols")]
    LengthTableMismatch { expected: usize, found: usize },

    /// A symbol id is absent from the symbol table.
    #[error("symbol {id} is not defined by the grammar")]
    UnknownSymbol { id: SymbolId },

    /// The run configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A random-access position lies outside the text.
    #[error("position {position} is outside the text of length {size}")]
    PositionOutOfRange { position: u64, size: u64 },

    /// Positions were requested from a text with no characters.
    #[error("the text is empty, no positions can be sampled")]
    EmptyText,

    /// A derivation tree would exceed the configured node limit.
    #[error("derivation tree exceeds the limit of {limit} nodes")]
    TreeTooLarge { limit: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps an I/O failure on `path`, separating a missing file from other errors.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Io { path, source }
        }
    }
}
