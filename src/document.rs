use crate::access::{locate, Expand};
use crate::depth::{DepthAnalyzer, DepthStats};
use crate::error::Result;
use crate::grammar::{Grammar, LengthTable};
use crate::loader::{load_rules, load_sequence, Layout};
use crate::sequence::Sequence;
use crate::symbol::{Symbol, SymbolId};
use std::path::Path;
use tracing::{info, warn};

/// A grammar-compressed text: symbol table, length table and top-level
/// sequence, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    grammar: Grammar,
    lengths: LengthTable,
    sequence: Sequence,
    uncompressed_size: u64,
}

impl Document {
    /// Bundles a grammar with its top-level sequence.
    ///
    /// Derives the length table and checks that the sequence only uses
    /// symbols the grammar defines.
    pub fn new(grammar: Grammar, sequence: Sequence) -> Result<Self> {
        sequence.validate(&grammar)?;
        let lengths = LengthTable::derive(&grammar)?;
        let uncompressed_size = sequence.uncompressed_size(&lengths)?;
        if uncompressed_size == 0 {
            warn!("top-level sequence is empty");
        }
        Ok(Self {
            grammar,
            lengths,
            sequence,
            uncompressed_size,
        })
    }

    /// Loads a rules file and a sequence file.
    pub fn open(rules: impl AsRef<Path>, sequence: impl AsRef<Path>, layout: Layout) -> Result<Self> {
        let grammar = load_rules(rules, layout)?;
        let sequence = load_sequence(sequence)?;
        let document = Self::new(grammar, sequence)?;
        info!(
            uncompressed_size = document.uncompressed_size,
            "document ready"
        );
        Ok(document)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn lengths(&self) -> &LengthTable {
        &self.lengths
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Length of the original text.
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Terminal symbol at `position`.
    pub fn locate(&self, position: u64) -> Result<SymbolId> {
        locate(
            self.sequence.as_slice(),
            &self.grammar,
            &self.lengths,
            position,
        )
    }

    /// Byte at `position` of the original text.
    pub fn byte_at(&self, position: u64) -> Result<u8> {
        let id = self.locate(position)?;
        // locate only ever returns terminals
        Ok(match self.grammar.symbol(id) {
            Symbol::Terminal(byte) => byte,
            Symbol::NonTerminal(..) => unreachable!("locate returned a rule"),
        })
    }

    /// Iterates over the whole text.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        Expand::new(&self.grammar, self.sequence.as_slice())
            .map(Expand::bytes)
            .into_iter()
            .flatten()
    }

    /// Depth statistics over the forest rooted at the top-level sequence.
    pub fn depth_stats(&self) -> Result<DepthStats> {
        DepthAnalyzer::new(&self.grammar, &self.lengths)?.analyze(self.sequence.as_slice())
    }
}
