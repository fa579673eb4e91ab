//! Symbol table and expansion-length table of a RePair grammar.
//!
//! A [`Grammar`] maps every symbol id to its definition. Terminals occupy ids
//! `0..alphabet_size`; rules follow in creation order, and every rule's
//! children have smaller ids than the rule itself. That ordering is checked on
//! construction, so a single forward pass computes all expansion lengths and
//! every descent through the grammar terminates.

use crate::error::{Error, Result};
use crate::loader::Layout;
use crate::symbol::{Symbol, SymbolDisplay, SymbolId};

/// Immutable symbol table of a RePair grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Number of terminal symbols
    alphabet_size: u32,

    /// How terminals were given, which also decides how they print
    layout: Layout,

    /// Definitions indexed by symbol id
    symbols: Vec<Symbol>,
}

impl Grammar {
    /// Builds a grammar whose terminals are given by an explicit character map.
    ///
    /// Terminal `i` stands for `char_map[i]`; rule `k` (0-based) receives id
    /// `char_map.len() + k`.
    pub fn with_char_map(char_map: &[u8], rules: &[(SymbolId, SymbolId)]) -> Result<Self> {
        let terminals = char_map.iter().map(|&byte| Symbol::Terminal(byte));
        Self::from_parts(Layout::CharMap, terminals, char_map.len() as u64, rules)
    }

    /// Builds a grammar whose terminal ids are the bytes themselves.
    ///
    /// Only alphabets of at most 256 symbols can be expressed this way.
    pub fn with_byte_terminals(alphabet_size: u32, rules: &[(SymbolId, SymbolId)]) -> Result<Self> {
        if alphabet_size > 256 {
            return Err(Error::AlphabetTooLarge { alphabet_size });
        }
        let terminals = (0..alphabet_size).map(|id| Symbol::Terminal(id as u8));
        Self::from_parts(Layout::Implicit, terminals, u64::from(alphabet_size), rules)
    }

    fn from_parts(
        layout: Layout,
        terminals: impl Iterator<Item = Symbol>,
        alphabet_size: u64,
        rules: &[(SymbolId, SymbolId)],
    ) -> Result<Self> {
        let count = alphabet_size + rules.len() as u64;
        if count > u64::from(SymbolId::MAX) + 1 {
            return Err(Error::TooManySymbols { count });
        }

        let mut symbols = Vec::with_capacity(count as usize);
        symbols.extend(terminals);

        for (index, &(left, right)) in rules.iter().enumerate() {
            let rule = (alphabet_size + index as u64) as SymbolId;
            for child in [left, right] {
                if child >= rule {
                    return Err(Error::InvalidRule { rule, child });
                }
            }
            symbols.push(Symbol::NonTerminal(left, right));
        }

        Ok(Self {
            alphabet_size: alphabet_size as u32,
            layout,
            symbols,
        })
    }

    /// Number of terminal symbols.
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Layout the terminals were given in.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of rules (non-terminals).
    pub fn num_rules(&self) -> usize {
        self.symbols.len() - self.alphabet_size as usize
    }

    /// Total number of symbols, terminals included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true when the grammar defines no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns true if `id` is defined.
    pub fn contains(&self, id: SymbolId) -> bool {
        (id as usize) < self.symbols.len()
    }

    /// Looks up the definition of `id`.
    pub fn get(&self, id: SymbolId) -> Option<Symbol> {
        self.symbols.get(id as usize).copied()
    }

    /// Definition of a symbol already known to be in the table.
    ///
    /// Children of validated rules always satisfy this.
    pub(crate) fn symbol(&self, id: SymbolId) -> Symbol {
        self.symbols[id as usize]
    }

    /// Formats `id` the way query results print it.
    pub fn display(&self, id: SymbolId) -> SymbolDisplay {
        SymbolDisplay {
            id,
            symbol: self.get(id),
            layout: self.layout,
        }
    }

    /// Iterates over terminals as `(id, byte)` in id order.
    pub fn terminals(&self) -> impl Iterator<Item = (SymbolId, u8)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .filter_map(|(id, symbol)| match *symbol {
                Symbol::Terminal(byte) => Some((id as SymbolId, byte)),
                Symbol::NonTerminal(..) => None,
            })
    }

    /// Iterates over rules as `(id, left, right)` in creation order.
    pub fn rules(&self) -> impl Iterator<Item = (SymbolId, SymbolId, SymbolId)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .skip(self.alphabet_size as usize)
            .filter_map(|(id, symbol)| {
                symbol
                    .children()
                    .map(|(left, right)| (id as SymbolId, left, right))
            })
    }
}

/// Expansion length of every symbol in a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthTable {
    lengths: Vec<u64>,
}

impl LengthTable {
    /// Computes all expansion lengths in one pass over ascending ids.
    ///
    /// Terminals have length 1; a rule's length is the sum of its children's,
    /// which are already known because children precede their parents.
    pub fn derive(grammar: &Grammar) -> Result<Self> {
        let mut lengths: Vec<u64> = Vec::with_capacity(grammar.len());

        for (id, symbol) in grammar.symbols.iter().enumerate() {
            let length = match *symbol {
                Symbol::Terminal(_) => 1,
                Symbol::NonTerminal(left, right) => lengths[left as usize]
                    .checked_add(lengths[right as usize])
                    .ok_or(Error::LengthOverflow {
                        rule: id as SymbolId,
                    })?,
            };
            lengths.push(length);
        }

        Ok(Self { lengths })
    }

    /// Expansion length of `id`, if defined.
    pub fn get(&self, id: SymbolId) -> Option<u64> {
        self.lengths.get(id as usize).copied()
    }

    /// Expansion length of a symbol already known to be in the table.
    pub(crate) fn of(&self, id: SymbolId) -> u64 {
        self.lengths[id as usize]
    }

    /// Number of entries, equal to the grammar's symbol count.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Fails unless the table has exactly one entry per symbol of `grammar`.
    pub(crate) fn check_matches(&self, grammar: &Grammar) -> Result<()> {
        if self.lengths.len() == grammar.len() {
            Ok(())
        } else {
            Err(Error::LengthTableMismatch {
                expected: grammar.len(),
                found: self.lengths.len(),
            })
        }
    }

    /// Total expansion length of a sequence of symbols.
    pub fn expanded_size(&self, ids: &[SymbolId]) -> Result<u64> {
        ids.iter().try_fold(0u64, |total, &id| {
            let length = self.get(id).ok_or(Error::UnknownSymbol { id })?;
            total
                .checked_add(length)
                .ok_or(Error::LengthOverflow { rule: id })
        })
    }
}
