//! # RePair Access - Random Access into Grammar-Compressed Text
//!
//! Reads RePair-style straight-line programs from their binary `.rules` /
//! `.C` files and answers "which character is at position `p`?" without
//! decompressing the text.
//!
//! A grammar has terminals `0..alphabet_size` and binary rules numbered after
//! them; every rule only references older symbols. Two file layouts exist:
//! with an explicit character map (RePair, RLZ-RePair) and with terminal ids
//! that are the bytes themselves (BigRePair, Re-RePair).
//!
//! ## Example
//!
//! ```
//! use repair_access::{Document, Grammar, Sequence};
//!
//! // 'a'=0, 'b'=1, rule 2 -> ab, rule 3 -> (2, 2) = abab
//! let grammar = Grammar::with_char_map(b"ab", &[(0, 1), (2, 2)]).unwrap();
//! let doc = Document::new(grammar, Sequence::from(vec![3, 0])).unwrap();
//!
//! assert_eq!(doc.uncompressed_size(), 5);
//! assert_eq!(doc.byte_at(2).unwrap(), b'a');
//! assert_eq!(doc.depth_stats().unwrap().max_depth, 2);
//! ```
//!
//! ## Performance
//!
//! - Lengths of all symbols are computed in one forward pass at load time
//! - A query scans the top-level sequence up to the covering symbol, then
//!   descends one level per step: O(prefix + depth), independent of text length
//! - Depth statistics memoize per symbol in dense arrays, no recursion

mod access;
mod config;
mod depth;
mod document;
mod error;
mod grammar;
mod id_gen;
mod loader;
mod query;
mod sequence;
mod summary;
mod symbol;
mod tree;

#[cfg(test)]
mod tests;

pub use access::{locate, Expand};
pub use config::{Config, GrammarFamily};
pub use depth::{depth_stats, DepthAnalyzer, DepthStats};
pub use document::Document;
pub use error::{Error, Result};
pub use grammar::{Grammar, LengthTable};
pub use id_gen::NodeId;
pub use loader::{load_rules, load_sequence, parse_rules, parse_sequence, Layout};
pub use query::{run_queries, sample_positions, QueryReport};
pub use sequence::Sequence;
pub use summary::{write_grammar, write_sequence};
pub use symbol::{Symbol, SymbolDisplay, SymbolId};
pub use tree::{Expansion, NodeKind, ParseTree, TreeBuilder, TreeNode, DEFAULT_NODE_LIMIT};
