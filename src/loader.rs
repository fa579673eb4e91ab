//! Binary readers for `.rules` grammar files and `.C` sequence files.
//!
//! All integers are 4-byte little-endian. A rules file starts with the
//! alphabet size, optionally followed by a character map of that many bytes,
//! then one 8-byte `(left, right)` record per rule:
//!
//! ```text
//! Layout::CharMap   u32 alphabet | alphabet x u8 | N x (u32, u32)
//! Layout::Implicit  u32 alphabet |                 N x (u32, u32)
//! ```
//!
//! A sequence file is a flat array of u32 symbol ids.

use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::sequence::Sequence;
use crate::symbol::SymbolId;
use std::path::Path;
use tracing::{debug, info};

const INT_SIZE: usize = 4;
const RECORD_SIZE: usize = 2 * INT_SIZE;

/// On-disk layout of a grammar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Alphabet size, explicit character map, rule records.
    CharMap,

    /// Alphabet size and rule records; terminal ids are the bytes themselves.
    Implicit,
}

/// Parses a grammar from the bytes of a rules file.
pub fn parse_rules(bytes: &[u8], layout: Layout) -> Result<Grammar> {
    let (header, rest) = split_checked(bytes, INT_SIZE, "alphabet size")?;
    let alphabet_size = read_u32(header);

    let grammar = match layout {
        Layout::CharMap => {
            let (char_map, records) =
                split_checked(rest, alphabet_size as usize, "character map")?;
            let rules = parse_records(records)?;
            Grammar::with_char_map(char_map, &rules)?
        }
        Layout::Implicit => {
            let rules = parse_records(rest)?;
            Grammar::with_byte_terminals(alphabet_size, &rules)?
        }
    };

    debug!(
        ?layout,
        alphabet_size,
        rules = grammar.num_rules(),
        "parsed grammar"
    );
    Ok(grammar)
}

/// Reads and parses a grammar file.
pub fn load_rules(path: impl AsRef<Path>, layout: Layout) -> Result<Grammar> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(path, e))?;
    let grammar = parse_rules(&bytes, layout)?;
    info!(
        path = %path.display(),
        alphabet_size = grammar.alphabet_size(),
        rules = grammar.num_rules(),
        "grammar loaded"
    );
    Ok(grammar)
}

/// Parses a top-level sequence from the bytes of a sequence file.
pub fn parse_sequence(bytes: &[u8]) -> Result<Sequence> {
    check_multiple(bytes.len(), INT_SIZE, "sequence")?;
    let symbols = bytes.chunks_exact(INT_SIZE).map(read_u32).collect();
    Ok(Sequence::new(symbols))
}

/// Reads and parses a sequence file.
pub fn load_sequence(path: impl AsRef<Path>) -> Result<Sequence> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(path, e))?;
    let sequence = parse_sequence(&bytes)?;
    info!(path = %path.display(), symbols = sequence.len(), "sequence loaded");
    Ok(sequence)
}

/// Decodes the rule record region, which must hold whole records only.
fn parse_records(bytes: &[u8]) -> Result<Vec<(SymbolId, SymbolId)>> {
    check_multiple(bytes.len(), RECORD_SIZE, "rule records")?;
    Ok(bytes
        .chunks_exact(RECORD_SIZE)
        .map(|record| (read_u32(&record[..INT_SIZE]), read_u32(&record[INT_SIZE..])))
        .collect())
}

fn split_checked<'a>(
    bytes: &'a [u8],
    len: usize,
    what: &'static str,
) -> Result<(&'a [u8], &'a [u8])> {
    if bytes.len() < len {
        return Err(Error::Truncated {
            what,
            expected: len as u64,
            found: bytes.len() as u64,
        });
    }
    Ok(bytes.split_at(len))
}

fn check_multiple(len: usize, unit: usize, what: &'static str) -> Result<()> {
    if len % unit != 0 {
        return Err(Error::Truncated {
            what,
            expected: len.next_multiple_of(unit) as u64,
            found: len as u64,
        });
    }
    Ok(())
}

/// Caller guarantees exactly four bytes.
fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; INT_SIZE];
    word.copy_from_slice(bytes);
    u32::from_le_bytes(word)
}
