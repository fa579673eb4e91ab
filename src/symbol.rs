use crate::loader::Layout;
use std::fmt;

/// Identifier of a grammar symbol.
///
/// Ids below the alphabet size are terminals; larger ids are rules, numbered
/// in the order they were created.
pub type SymbolId = u32;

/// Symbol types in a RePair grammar.
///
/// Decided once at load time; consumers match on the variant instead of
/// inspecting ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single byte of the original text.
    Terminal(u8),

    /// A rule expanding to `left` followed by `right`.
    NonTerminal(SymbolId, SymbolId),
}

impl Symbol {
    /// Returns true for terminal symbols.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Returns the children of a rule, or `None` for a terminal.
    pub fn children(&self) -> Option<(SymbolId, SymbolId)> {
        match *self {
            Symbol::Terminal(_) => None,
            Symbol::NonTerminal(left, right) => Some((left, right)),
        }
    }
}

/// Human-readable form of a symbol id, as written to query output.
///
/// - `'c'` for a printable terminal, judged per layout
/// - `byte(<id>)` for any other terminal
/// - the bare id for a rule
/// - `?<id>?` for an id the grammar does not define
#[derive(Debug, Clone, Copy)]
pub struct SymbolDisplay {
    pub(crate) id: SymbolId,
    pub(crate) symbol: Option<Symbol>,
    pub(crate) layout: Layout,
}

impl fmt::Display for SymbolDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(Symbol::Terminal(byte)) if is_printable(byte, self.layout) => {
                write!(f, "'{}'", byte as char)
            }
            Some(Symbol::Terminal(_)) => write!(f, "byte({})", self.id),
            Some(Symbol::NonTerminal(..)) => write!(f, "{}", self.id),
            None => write!(f, "?{}?", self.id),
        }
    }
}

/// Whether a terminal byte prints as a quoted character.
///
/// Mapped terminals are read as ASCII: graphic characters and the space.
/// Implicit terminals are read as Latin-1 code points, so the printable
/// upper half (0xA1..=0xFF without the soft hyphen 0xAD) counts as well.
pub(crate) fn is_printable(byte: u8, layout: Layout) -> bool {
    match (layout, byte) {
        (_, 0x20..=0x7E) => true,
        (Layout::Implicit, 0xA1..=0xFF) => byte != 0xAD,
        _ => false,
    }
}
