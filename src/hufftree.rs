use std::fmt;

use crate::code::Code;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinPriorityQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Joins two subtrees; `a` becomes the left child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn generate_table(&self, code_table: &mut CodeTable, code: Code) {
        match self {
            HuffNode::Leaf { byte, .. } => {
                code_table.insert(*byte, code);
            }
            HuffNode::Internal { left, right, .. } => {
                left.generate_table(code_table, code.with_bit(false));
                right.generate_table(code_table, code.with_bit(true));
            }
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                let shown = if byte.is_ascii_graphic() { *byte as char } else { '.' };
                writeln!(f, "{indent}{label}-> Leaf: '{shown}' ({byte}) [weight: {weight}]")
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

/// Huffman tree built greedily from byte frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptySource);
        }

        let mut heap = MinPriorityQueue::with_capacity(frequencies.distinct());
        heap.build_from_pairs(
            frequencies
                .iter()
                .map(|(byte, count)| (HuffNode::new(byte, count), count)),
        );
        HuffmanTree::build_from_heap(heap)
    }

    fn build_from_heap(mut heap: MinPriorityQueue<HuffNode, u64>) -> Result<Self> {
        while heap.len() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            let z = HuffNode::merge(x, y);
            let weight = z.weight();
            heap.insert(z, weight);
        }
        let root = heap.extract_min()?;
        Ok(HuffmanTree { root })
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Code for every leaf: `0` per left edge, `1` per right edge.
    ///
    /// A tree that is a single leaf has no edges; its symbol gets the code `0`.
    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        match &self.root {
            HuffNode::Leaf { byte, .. } => table.insert(*byte, Code::new().with_bit(false)),
            internal => internal.generate_table(&mut table, Code::new()),
        }
        table
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}

/// Index of a node inside a [`DecodeTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, Default)]
struct DecodeNode {
    symbol: Option<u8>,
    children: [Option<NodeId>; 2],
}

/// Arena-backed tree grown top-down from a code table, used to walk the payload.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    pub const ROOT: NodeId = 0;

    /// Rebuilds the tree by walking each code from the root and creating missing nodes.
    ///
    /// Fails when codes conflict: one passing through another symbol, ending on an
    /// interior node, or two symbols sharing a code.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut tree = DecodeTree {
            nodes: vec![DecodeNode::default()],
        };
        for (symbol, code) in table.iter() {
            tree.insert(symbol, code)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, symbol: u8, code: &Code) -> Result<()> {
        // every symbol consumes at least one payload bit
        if code.is_empty() {
            return Err(HuffmanError::malformed(format!("symbol {symbol} has an empty code")));
        }
        let mut cursor = Self::ROOT;
        for bit in code.iter() {
            if let Some(existing) = self.nodes[cursor].symbol {
                return Err(HuffmanError::malformed(format!(
                    "code {code} for symbol {symbol} passes through the code of symbol {existing}"
                )));
            }
            let slot = usize::from(bit);
            cursor = match self.nodes[cursor].children[slot] {
                Some(child) => child,
                None => {
                    self.nodes.push(DecodeNode::default());
                    let child = self.nodes.len() - 1;
                    self.nodes[cursor].children[slot] = Some(child);
                    child
                }
            };
        }

        let node = &mut self.nodes[cursor];
        if let Some(existing) = node.symbol {
            return Err(HuffmanError::malformed(format!(
                "symbols {existing} and {symbol} share the code {code}"
            )));
        }
        if node.children.iter().any(Option::is_some) {
            return Err(HuffmanError::malformed(format!(
                "code {code} for symbol {symbol} is a prefix of another code"
            )));
        }
        node.symbol = Some(symbol);
        Ok(())
    }

    /// Child on the `bit` side, or `None` when it is absent or `node` is not in this tree.
    pub fn child(&self, node: NodeId, bit: bool) -> Option<NodeId> {
        self.nodes.get(node)?.children[usize::from(bit)]
    }

    /// `false` for ids outside this tree.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.children.iter().all(Option::is_none))
    }

    pub fn symbol(&self, node: NodeId) -> Option<u8> {
        self.nodes.get(node)?.symbol
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Codes of every symbol-bearing leaf, read back off the tree.
    pub fn to_code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut stack = vec![(Self::ROOT, Code::new())];
        while let Some((node, code)) = stack.pop() {
            if let (true, Some(symbol)) = (self.is_leaf(node), self.symbol(node)) {
                table.insert(symbol, code);
                continue;
            }
            for bit in [true, false] {
                if let Some(child) = self.child(node, bit) {
                    stack.push((child, code.with_bit(bit)));
                }
            }
        }
        table
    }
}
