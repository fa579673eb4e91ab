//! Random access into the text represented by a grammar.
//!
//! [`locate`] resolves one position by descending the derivation tree;
//! [`Expand`] walks the whole expansion left to right and is the reference
//! that random access is checked against.

use crate::error::{Error, Result};
use crate::grammar::{Grammar, LengthTable};
use crate::symbol::{Symbol, SymbolId};

/// Returns the terminal symbol at `position` of the text.
///
/// The top-level sequence is scanned until the symbol whose expansion covers
/// `position` is found; from there the search descends into the left or right
/// child, keeping the offset relative to the current symbol's start. Cost is
/// the number of top-level symbols skipped plus the depth of the descent.
///
/// `lengths` must be the table derived from `grammar`; a table of a different
/// size is rejected with [`Error::LengthTableMismatch`]. A position at or past
/// the end of the text yields [`Error::PositionOutOfRange`].
pub fn locate(
    sequence: &[SymbolId],
    grammar: &Grammar,
    lengths: &LengthTable,
    position: u64,
) -> Result<SymbolId> {
    lengths.check_matches(grammar)?;

    let mut offset = position;
    let mut found = None;

    for &id in sequence {
        let length = lengths.get(id).ok_or(Error::UnknownSymbol { id })?;
        if offset < length {
            found = Some(id);
            break;
        }
        offset -= length;
    }

    let Some(mut id) = found else {
        return Err(Error::PositionOutOfRange {
            position,
            size: position - offset,
        });
    };

    loop {
        match grammar.symbol(id) {
            Symbol::Terminal(_) => return Ok(id),
            Symbol::NonTerminal(left, right) => {
                let left_length = lengths.of(left);
                if offset < left_length {
                    id = left;
                } else {
                    offset -= left_length;
                    id = right;
                }
            }
        }
    }
}

/// Iterator over the terminal ids of a full expansion.
///
/// Uses an explicit stack of pending symbols, so deep grammars do not recurse.
pub struct Expand<'a> {
    grammar: &'a Grammar,
    stack: Vec<SymbolId>,
}

impl<'a> Expand<'a> {
    /// Expands `roots` in order. Every id must be defined by `grammar`.
    pub fn new(grammar: &'a Grammar, roots: &[SymbolId]) -> Result<Self> {
        if let Some(&id) = roots.iter().find(|&&id| !grammar.contains(id)) {
            return Err(Error::UnknownSymbol { id });
        }
        Ok(Self {
            grammar,
            stack: roots.iter().rev().copied().collect(),
        })
    }

    /// Maps terminal ids to the bytes they stand for.
    pub fn bytes(self) -> impl Iterator<Item = u8> + 'a {
        let grammar = self.grammar;
        self.filter_map(move |id| match grammar.symbol(id) {
            Symbol::Terminal(byte) => Some(byte),
            Symbol::NonTerminal(..) => None,
        })
    }
}

impl Iterator for Expand<'_> {
    type Item = SymbolId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match self.grammar.symbol(id) {
                Symbol::Terminal(_) => return Some(id),
                Symbol::NonTerminal(left, right) => {
                    // Right pushed first so left is expanded first
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Terminals a=0, b=1, c=2; rule 3 -> (b, c); rule 4 -> (3, a)
    fn setup() -> (Grammar, LengthTable) {
        let grammar = Grammar::with_char_map(b"abc", &[(1, 2), (3, 0)]).unwrap();
        let lengths = LengthTable::derive(&grammar).unwrap();
        (grammar, lengths)
    }

    #[test]
    fn test_locate_within_single_rule() {
        let (grammar, lengths) = setup();
        let seq = [4];
        let found: Vec<_> = (0..3)
            .map(|pos| locate(&seq, &grammar, &lengths, pos).unwrap())
            .collect();
        assert_eq!(found, vec![1, 2, 0]);
    }

    #[test]
    fn test_locate_across_top_level() {
        let (grammar, lengths) = setup();
        // "bca" + "a" + "bc"
        let seq = [4, 0, 3];
        let text: Vec<u8> = (0..6)
            .map(|pos| locate(&seq, &grammar, &lengths, pos).unwrap())
            .map(|id| match grammar.symbol(id) {
                Symbol::Terminal(byte) => byte,
                Symbol::NonTerminal(..) => unreachable!(),
            })
            .collect();
        assert_eq!(text, b"bcaabc");
    }

    #[test]
    fn test_locate_boundaries() {
        let (grammar, lengths) = setup();
        let seq = [3, 4];
        assert_eq!(locate(&seq, &grammar, &lengths, 0).unwrap(), 1);
        assert_eq!(locate(&seq, &grammar, &lengths, 4).unwrap(), 0);
    }

    #[test]
    fn test_locate_out_of_range() {
        let (grammar, lengths) = setup();
        let seq = [4, 0];
        assert!(matches!(
            locate(&seq, &grammar, &lengths, 4),
            Err(Error::PositionOutOfRange { position: 4, size: 4 })
        ));
        assert!(matches!(
            locate(&[], &grammar, &lengths, 0),
            Err(Error::PositionOutOfRange { position: 0, size: 0 })
        ));
    }

    #[test]
    fn test_locate_unknown_symbol() {
        let (grammar, lengths) = setup();
        assert!(matches!(
            locate(&[7], &grammar, &lengths, 0),
            Err(Error::UnknownSymbol { id: 7 })
        ));
    }

    #[test]
    fn test_locate_rejects_foreign_length_table() {
        let (grammar, _) = setup();
        // Derived from a grammar with one more rule, so id 5 has a length here
        let larger = Grammar::with_char_map(b"abc", &[(1, 2), (3, 0), (4, 4)]).unwrap();
        let lengths = LengthTable::derive(&larger).unwrap();
        assert!(matches!(
            locate(&[5], &grammar, &lengths, 0),
            Err(Error::LengthTableMismatch { expected: 5, found: 6 })
        ));

        let smaller = Grammar::with_char_map(b"abc", &[]).unwrap();
        let lengths = LengthTable::derive(&smaller).unwrap();
        assert!(matches!(
            locate(&[4], &grammar, &lengths, 0),
            Err(Error::LengthTableMismatch { expected: 5, found: 3 })
        ));
    }

    #[test]
    fn test_expand() {
        let (grammar, _) = setup();
        let ids: Vec<_> = Expand::new(&grammar, &[4, 3]).unwrap().collect();
        assert_eq!(ids, vec![1, 2, 0, 1, 2]);
        let bytes: Vec<u8> = Expand::new(&grammar, &[4, 3]).unwrap().bytes().collect();
        assert_eq!(bytes, b"bcabc");
        assert_eq!(Expand::new(&grammar, &[]).unwrap().count(), 0);
        assert!(Expand::new(&grammar, &[5]).is_err());
    }
}
