use crate::error::{Error, Result};
use crate::grammar::{Grammar, LengthTable};
use crate::symbol::SymbolId;

/// Top-level sequence of a compressed text.
///
/// The concatenated expansions of these symbols, in order, reproduce the
/// original text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    symbols: Vec<SymbolId>,
}

impl Sequence {
    pub fn new(symbols: Vec<SymbolId>) -> Self {
        Self { symbols }
    }

    /// Symbols in text order.
    pub fn as_slice(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Number of top-level symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Checks that every symbol is defined by `grammar`.
    pub fn validate(&self, grammar: &Grammar) -> Result<()> {
        match self.symbols.iter().find(|&&id| !grammar.contains(id)) {
            Some(&id) => Err(Error::UnknownSymbol { id }),
            None => Ok(()),
        }
    }

    /// Length of the original text.
    pub fn uncompressed_size(&self, lengths: &LengthTable) -> Result<u64> {
        lengths.expanded_size(&self.symbols)
    }
}

impl From<Vec<SymbolId>> for Sequence {
    fn from(symbols: Vec<SymbolId>) -> Self {
        Self::new(symbols)
    }
}
