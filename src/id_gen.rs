use std::fmt;

/// Display id of a derivation-tree node, rendered as `node<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Hands out sequential node ids for one tree build.
///
/// Owned by the builder, so separate builds never share a counter.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Creates a new ID generator starting from ID 0.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Gets the next unused id.
    pub(crate) fn get(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub(crate) fn issued(&self) -> usize {
        self.next as usize
    }
}
