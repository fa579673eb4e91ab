//! Plain-text listings of a grammar and its top-level sequence.

use crate::grammar::Grammar;
use crate::loader::Layout;
use crate::sequence::Sequence;
use crate::symbol::is_printable;
use std::io::{self, Write};

/// Writes every rule, preceded by the printable terminals when the grammar
/// carries a character map.
pub fn write_grammar<W: Write>(grammar: &Grammar, out: &mut W) -> io::Result<()> {
    writeln!(out, "--- Parsed Grammar Rules ---")?;

    // Implicit terminals are just the byte values, nothing to list.
    if grammar.layout() == Layout::CharMap {
        writeln!(out, "\nFound {} terminal symbols.", grammar.alphabet_size())?;
        for (id, byte) in grammar.terminals() {
            if is_printable(byte, Layout::CharMap) {
                writeln!(out, "    {} -> {}", id, grammar.display(id))?;
            }
        }
    }

    writeln!(out, "\nFound {} non-terminal rules:", grammar.num_rules())?;
    for (id, left, right) in grammar.rules() {
        writeln!(
            out,
            "    {} -> ({},{})",
            id,
            grammar.display(left),
            grammar.display(right)
        )?;
    }

    writeln!(out, "\nTotal symbols in grammar: {}", grammar.len())
}

/// Writes the top-level symbol ids and their count.
pub fn write_sequence<W: Write>(sequence: &Sequence, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n--- Loaded Compressed Sequence ---")?;
    let ids: Vec<String> = sequence.as_slice().iter().map(|id| id.to_string()).collect();
    writeln!(out, "[{}]", ids.join(", "))?;
    writeln!(out, "Sequence contains {} symbols.", sequence.len())
}
