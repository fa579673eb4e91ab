//! Property tests over randomly generated grammars.


use crate::grammar::Grammar;
use crate::loader::Layout;
use crate::symbol::{Symbol, SymbolId};
use proptest::prelude::*;

/// A grammar in raw form: character map, rule records and a top-level sequence.
#[derive(Debug, Clone)]
pub(crate) struct RawGrammar {
    pub char_map: Vec<u8>,
    pub rules: Vec<(SymbolId, SymbolId)>,
    pub sequence: Vec<SymbolId>,
}

/// Rules only reference older symbols; with at most 12 rules no symbol
/// expands past 4096 characters.
pub(crate) fn arb_grammar() -> impl Strategy<Value = RawGrammar> {
    (1usize..=8, 0usize..12).prop_flat_map(|(alphabet, num_rules)| {
        let rules: Vec<_> = (0..num_rules)
            .map(|i| {
                let id = (alphabet + i) as SymbolId;
                (0..id, 0..id)
            })
            .collect();
        let total = (alphabet + num_rules) as SymbolId;
        (
            prop::collection::vec(any::<u8>(), alphabet),
            rules,
            prop::collection::vec(0..total, 0..8),
        )
            .prop_map(|(char_map, rules, sequence)| RawGrammar {
                char_map,
                rules,
                sequence,
            })
    })
}

/// Serializes a grammar into the bytes of a rules file.
pub(crate) fn encode_rules(layout: Layout, char_map: &[u8], rules: &[(SymbolId, SymbolId)]) -> Vec<u8> {
    let mut bytes = (char_map.len() as u32).to_le_bytes().to_vec();
    if layout == Layout::CharMap {
        bytes.extend_from_slice(char_map);
    }
    for &(left, right) in rules {
        bytes.extend_from_slice(&left.to_le_bytes());
        bytes.extend_from_slice(&right.to_le_bytes());
    }
    bytes
}

/// Serializes a top-level sequence into the bytes of a sequence file.
pub(crate) fn encode_sequence(sequence: &[SymbolId]) -> Vec<u8> {
    sequence.iter().flat_map(|id| id.to_le_bytes()).collect()
}

/// Reference expansion by plain recursive substitution.
pub(crate) fn naive_expand(grammar: &Grammar, id: SymbolId, out: &mut Vec<u8>) {
    match grammar.get(id) {
        Some(Symbol::Terminal(byte)) => out.push(byte),
        Some(Symbol::NonTerminal(left, right)) => {
            naive_expand(grammar, left, out);
            naive_expand(grammar, right, out);
        }
        None => panic!("symbol {id} missing"),
    }
}
