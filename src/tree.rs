// src/tree.rs

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTreeNode {
    Leaf {
        symbol: char,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<CodeTreeNode>,
        right: Box<CodeTreeNode>,
    },
}

impl CodeTreeNode {
    pub fn leaf(symbol: char, weight: usize) -> Self {
        CodeTreeNode::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { weight, .. } => *weight,
            CodeTreeNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `left` is the one popped first (the lighter one).
    pub fn merge(left: Self, right: Self) -> Self {
        CodeTreeNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, CodeTreeNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 1,
            CodeTreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            CodeTreeNode::Leaf { .. } => 0,
            CodeTreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

// Queue entry: a subtree plus the sequence number it was pushed with.
#[derive(Debug)]
struct Pending {
    node: CodeTreeNode,
    seq: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

// Reversed so that BinaryHeap pops the lightest, oldest entry first.
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the coding tree for a frequency table.
///
/// Leaves are queued in the table's first-occurrence order and every merged
/// node takes the next sequence number, so equal weights always resolve the
/// same way. Returns `None` for an empty table.
pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<CodeTreeNode> {
    let mut heap = BinaryHeap::with_capacity(frequencies.len());
    let mut seq = 0;

    for (symbol, weight) in frequencies.iter() {
        heap.push(Pending {
            node: CodeTreeNode::leaf(symbol, weight),
            seq,
        });
        seq += 1;
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(Pending {
            node: CodeTreeNode::merge(left.node, right.node),
            seq,
        });
        seq += 1;
    }

    heap.pop().map(|pending| pending.node)
}

/// Count the symbols of `text` and build its coding tree.
pub fn build_tree(text: &str) -> Option<CodeTreeNode> {
    from_frequencies(&FrequencyTable::from_text(text))
}
