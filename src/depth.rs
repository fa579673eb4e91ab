//! Depth statistics of the derivation forest.
//!
//! Every top-level symbol roots one derivation tree. For each symbol two
//! quantities are memoized, each in its own dense table indexed by id:
//!
//! - `max_depth`: 0 for a terminal, `1 + max(children)` for a rule
//! - `leaf_depth_sum`: 0 for a terminal; for a rule, the children's sums plus
//!   the children's lengths, since every leaf below moves one level down
//!
//! Both are evaluated with an explicit post-order worklist, so grammars
//! deeper than the call stack are handled.

use crate::error::{Error, Result};
use crate::grammar::{Grammar, LengthTable};
use crate::symbol::{Symbol, SymbolId};
use tracing::debug;

/// Aggregate depth statistics of one grammar-compressed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStats {
    /// Deepest derivation tree among the top-level symbols
    pub max_depth: u32,
    /// Sum of the depths of all leaves
    pub total_leaf_depth_sum: u128,
    /// Number of leaves, i.e. the text length
    pub uncompressed_size: u64,
}

impl DepthStats {
    /// Mean leaf depth, 0 for an empty text.
    pub fn average_leaf_depth(&self) -> f64 {
        if self.uncompressed_size == 0 {
            0.0
        } else {
            self.total_leaf_depth_sum as f64 / self.uncompressed_size as f64
        }
    }
}

/// Memoizing evaluator for per-symbol depth measures.
///
/// The memo tables live for one analysis; create a fresh analyzer per run.
pub struct DepthAnalyzer<'a> {
    grammar: &'a Grammar,
    lengths: &'a LengthTable,
    max_depth: Vec<Option<u32>>,
    leaf_depth_sum: Vec<Option<u128>>,
}

impl<'a> DepthAnalyzer<'a> {
    /// Fails with [`Error::LengthTableMismatch`] unless `lengths` has one
    /// entry per symbol of `grammar`.
    pub fn new(grammar: &'a Grammar, lengths: &'a LengthTable) -> Result<Self> {
        lengths.check_matches(grammar)?;
        Ok(Self {
            grammar,
            lengths,
            max_depth: vec![None; grammar.len()],
            leaf_depth_sum: vec![None; grammar.len()],
        })
    }

    /// Height of the derivation tree rooted at `id`.
    pub fn max_depth(&mut self, id: SymbolId) -> Result<u32> {
        self.check(id)?;
        Ok(evaluate(self.grammar, &mut self.max_depth, id, 0, |_, left, _, right| {
            1 + left.max(right)
        }))
    }

    /// Sum of leaf depths in the derivation tree rooted at `id`.
    pub fn leaf_depth_sum(&mut self, id: SymbolId) -> Result<u128> {
        self.check(id)?;
        let lengths = self.lengths;
        Ok(evaluate(
            self.grammar,
            &mut self.leaf_depth_sum,
            id,
            0,
            |left_id, left, right_id, right| {
                left + right + u128::from(lengths.of(left_id)) + u128::from(lengths.of(right_id))
            },
        ))
    }

    /// Aggregates both measures over the forest rooted at `sequence`.
    pub fn analyze(&mut self, sequence: &[SymbolId]) -> Result<DepthStats> {
        let mut stats = DepthStats {
            max_depth: 0,
            total_leaf_depth_sum: 0,
            uncompressed_size: self.lengths.expanded_size(sequence)?,
        };

        for &id in sequence {
            stats.max_depth = stats.max_depth.max(self.max_depth(id)?);
            stats.total_leaf_depth_sum += self.leaf_depth_sum(id)?;
        }

        debug!(
            roots = sequence.len(),
            max_depth = stats.max_depth,
            leaf_depth_sum = %stats.total_leaf_depth_sum,
            "depth analysis finished"
        );
        Ok(stats)
    }

    fn check(&self, id: SymbolId) -> Result<()> {
        if self.grammar.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownSymbol { id })
        }
    }
}

/// Computes `memo[root]` bottom-up without recursion.
///
/// A rule is resolved once both children are; unresolved children are pushed
/// on top of it. Already memoized symbols are never revisited.
fn evaluate<T, F>(grammar: &Grammar, memo: &mut [Option<T>], root: SymbolId, leaf: T, combine: F) -> T
where
    T: Copy,
    F: Fn(SymbolId, T, SymbolId, T) -> T,
{
    let mut stack = vec![root];
    let mut resolved = leaf;

    while let Some(&id) = stack.last() {
        if let Some(value) = memo[id as usize] {
            resolved = value;
            stack.pop();
            continue;
        }

        match grammar.symbol(id) {
            Symbol::Terminal(_) => {
                memo[id as usize] = Some(leaf);
                resolved = leaf;
                stack.pop();
            }
            Symbol::NonTerminal(left, right) => {
                match (memo[left as usize], memo[right as usize]) {
                    (Some(l), Some(r)) => {
                        let value = combine(left, l, right, r);
                        memo[id as usize] = Some(value);
                        resolved = value;
                        stack.pop();
                    }
                    (l, r) => {
                        if r.is_none() {
                            stack.push(right);
                        }
                        if l.is_none() {
                            stack.push(left);
                        }
                    }
                }
            }
        }
    }

    // The root is the last entry popped.
    resolved
}

/// Convenience wrapper running a fresh analysis over `sequence`.
pub fn depth_stats(grammar: &Grammar, lengths: &LengthTable, sequence: &[SymbolId]) -> Result<DepthStats> {
    DepthAnalyzer::new(grammar, lengths)?.analyze(sequence)
}
