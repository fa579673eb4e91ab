//! Derivation trees for visualization.
//!
//! A [`ParseTree`] is a plain structure of labeled nodes and parent/child
//! edges: one root for the compressed sequence with a subtree per top-level
//! symbol. Rendering is left to an external graph tool; [`ParseTree::to_dot`]
//! produces Graphviz input for it.
//!
//! # Example
//!
//! ```
//! use repair_access::{Grammar, TreeBuilder};
//!
//! let grammar = Grammar::with_char_map(b"ab", &[(0, 1)]).unwrap();
//! let tree = TreeBuilder::new(&grammar).build(&[2, 0]).unwrap();
//!
//! // root, rule 2 with two leaves, and the trailing 'a'
//! assert_eq!(tree.len(), 5);
//! assert!(tree.to_dot().contains("node1 -> node2"));
//! ```

use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::id_gen::{IdGenerator, NodeId};
use crate::symbol::{Symbol, SymbolId};
use ahash::AHashMap as HashMap;
use slotmap::{DefaultKey, SlotMap};
use std::fmt;
use std::str::FromStr;

/// Default cap on the number of nodes in one tree.
pub const DEFAULT_NODE_LIMIT: usize = 10_000;

/// Role of a node in the derivation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The compressed sequence itself
    Root,
    /// A rule occurrence
    Rule,
    /// A terminal occurrence
    Terminal,
}

/// How repeated rules are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Every occurrence gets its own subtree.
    #[default]
    Full,
    /// Each symbol appears once; repeated uses share the node.
    Shared,
}

impl FromStr for Expansion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(Expansion::Full),
            "shared" => Ok(Expansion::Shared),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown tree expansion `{other}`, expected `full` or `shared`"
            ))),
        }
    }
}

/// A node of a [`ParseTree`].
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Grammar symbol, `None` for the root
    pub symbol: Option<SymbolId>,
    pub children: Vec<DefaultKey>,
}

/// Derivation tree (or DAG, under [`Expansion::Shared`]) of a sequence.
#[derive(Debug)]
pub struct ParseTree {
    nodes: SlotMap<DefaultKey, TreeNode>,
    root: DefaultKey,
}

impl ParseTree {
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root]
    }

    pub fn get(&self, key: DefaultKey) -> Option<&TreeNode> {
        self.nodes.get(key)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut nodes: Vec<_> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.id);
        nodes
    }

    /// Parent/child pairs, grouped by parent in id order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes()
            .into_iter()
            .flat_map(|parent| {
                parent
                    .children
                    .iter()
                    .map(move |&child| (parent.id, self.nodes[child].id))
            })
            .collect()
    }

    /// Graphviz description of the tree.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

/// Formats the tree as Graphviz input.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// RePair Parse Tree")?;
        writeln!(f, "digraph {{")?;
        writeln!(f, "\trankdir=TB splines=line")?;
        writeln!(f, "\tnode [fontname=helvetica shape=box style=rounded]")?;
        writeln!(f, "\tedge [arrowhead=none]")?;

        for node in self.nodes() {
            let shape = match node.kind {
                NodeKind::Root => "none",
                NodeKind::Rule => "box",
                NodeKind::Terminal => "plaintext",
            };
            writeln!(
                f,
                "\t{} [label=\"{}\" shape={}]",
                node.id,
                escape(&node.label),
                shape
            )?;
        }
        for (parent, child) in self.edges() {
            writeln!(f, "\t{parent} -> {child}")?;
        }

        writeln!(f, "}}")
    }
}

fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds a [`ParseTree`] for a top-level sequence.
///
/// Node ids are handed out in pre-order: the root first, then each
/// subtree left to right.
pub struct TreeBuilder<'a> {
    grammar: &'a Grammar,
    expansion: Expansion,
    node_limit: usize,
    ids: IdGenerator,
    nodes: SlotMap<DefaultKey, TreeNode>,
    /// Emitted node per symbol, used under `Expansion::Shared`
    emitted: HashMap<SymbolId, DefaultKey>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Self {
            grammar,
            expansion: Expansion::Full,
            node_limit: DEFAULT_NODE_LIMIT,
            ids: IdGenerator::new(),
            nodes: SlotMap::new(),
            emitted: HashMap::default(),
        }
    }

    pub fn expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Fails the build instead of exceeding `limit` nodes.
    pub fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit;
        self
    }

    pub fn build(mut self, sequence: &[SymbolId]) -> Result<ParseTree> {
        if let Some(&id) = sequence.iter().find(|&&id| !self.grammar.contains(id)) {
            return Err(Error::UnknownSymbol { id });
        }

        let labels: Vec<String> = sequence
            .iter()
            .map(|&id| self.grammar.display(id).to_string())
            .collect();
        let label = format!("Compressed Sequence\n({})", labels.join(" "));
        let root = self.insert(label, NodeKind::Root, None)?;

        // (symbol, parent), popped in pre-order
        let mut pending: Vec<(SymbolId, DefaultKey)> =
            sequence.iter().rev().map(|&id| (id, root)).collect();

        while let Some((id, parent)) = pending.pop() {
            if self.expansion == Expansion::Shared {
                if let Some(&existing) = self.emitted.get(&id) {
                    self.nodes[parent].children.push(existing);
                    continue;
                }
            }

            let symbol = self.grammar.symbol(id);
            let kind = match symbol {
                Symbol::Terminal(_) => NodeKind::Terminal,
                Symbol::NonTerminal(..) => NodeKind::Rule,
            };
            let label = self.grammar.display(id).to_string();
            let key = self.insert(label, kind, Some(id))?;
            self.nodes[parent].children.push(key);
            if self.expansion == Expansion::Shared {
                self.emitted.insert(id, key);
            }

            if let Symbol::NonTerminal(left, right) = symbol {
                pending.push((right, key));
                pending.push((left, key));
            }
        }

        Ok(ParseTree {
            nodes: self.nodes,
            root,
        })
    }

    fn insert(&mut self, label: String, kind: NodeKind, symbol: Option<SymbolId>) -> Result<DefaultKey> {
        if self.ids.issued() >= self.node_limit {
            return Err(Error::TreeTooLarge {
                limit: self.node_limit,
            });
        }
        let id = self.ids.get();
        Ok(self.nodes.insert(TreeNode {
            id,
            label,
            kind,
            symbol,
            children: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 'a'=0, 'b'=1; rule 2 -> (a, b); rule 3 -> (2, 2)
    fn grammar() -> Grammar {
        Grammar::with_char_map(b"ab", &[(0, 1), (2, 2)]).unwrap()
    }

    fn labels(tree: &ParseTree) -> Vec<String> {
        tree.nodes().iter().map(|node| node.label.clone()).collect()
    }

    #[test]
    fn test_full_expansion_preorder() {
        let grammar = grammar();
        let tree = TreeBuilder::new(&grammar).build(&[3, 0]).unwrap();

        assert_eq!(tree.len(), 9);
        assert_eq!(
            labels(&tree),
            vec![
                "Compressed Sequence\n(3 'a')",
                "3",
                "2",
                "'a'",
                "'b'",
                "2",
                "'a'",
                "'b'",
                "'a'",
            ]
        );
        assert_eq!(tree.root().kind, NodeKind::Root);
        assert_eq!(tree.root().children.len(), 2);
    }

    #[test]
    fn test_edges() {
        let grammar = grammar();
        let tree = TreeBuilder::new(&grammar).build(&[2]).unwrap();
        let edges: Vec<String> = tree
            .edges()
            .iter()
            .map(|(p, c)| format!("{p}->{c}"))
            .collect();
        assert_eq!(edges, vec!["node0->node1", "node1->node2", "node1->node3"]);
    }

    #[test]
    fn test_shared_expansion() {
        let grammar = grammar();
        let tree = TreeBuilder::new(&grammar)
            .expansion(Expansion::Shared)
            .build(&[3, 0])
            .unwrap();

        // root, 3, 2, 'a', 'b'
        assert_eq!(tree.len(), 5);
        let rule3 = tree.get(tree.root().children[0]).unwrap();
        assert_eq!(rule3.children[0], rule3.children[1]);
        // trailing 'a' reuses the leaf under rule 2
        assert_eq!(tree.edges().len(), 6);
    }

    #[test]
    fn test_node_limit() {
        let grammar = grammar();
        let result = TreeBuilder::new(&grammar).node_limit(4).build(&[3]);
        assert!(matches!(result, Err(Error::TreeTooLarge { limit: 4 })));
    }

    #[test]
    fn test_unknown_symbol() {
        let grammar = grammar();
        assert!(matches!(
            TreeBuilder::new(&grammar).build(&[9]),
            Err(Error::UnknownSymbol { id: 9 })
        ));
    }

    #[test]
    fn test_dot_output() {
        let grammar = grammar();
        let dot = TreeBuilder::new(&grammar).build(&[2]).unwrap().to_dot();
        assert!(dot.starts_with("// RePair Parse Tree\ndigraph {"));
        assert!(dot.contains("node0 [label=\"Compressed Sequence\\n(2)\" shape=none]"));
        assert!(dot.contains("node1 [label=\"2\" shape=box]"));
        assert!(dot.contains("node2 [label=\"'a'\" shape=plaintext]"));
        assert!(dot.contains("node1 -> node3"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_display_matches_dot() {
        let grammar = grammar();
        let tree = TreeBuilder::new(&grammar).build(&[2, 0]).unwrap();
        let rendered = format!("{tree}");
        assert_eq!(rendered, tree.to_dot());
        // header, five nodes, four edges, closing brace
        assert_eq!(rendered.lines().count(), 5 + 5 + 4 + 1);
    }

    #[test]
    fn test_expansion_from_str() {
        assert_eq!("full".parse::<Expansion>().unwrap(), Expansion::Full);
        assert_eq!("shared".parse::<Expansion>().unwrap(), Expansion::Shared);
        assert!("dag".parse::<Expansion>().is_err());
    }
}
