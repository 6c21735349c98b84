// src/codes.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::frequency::FrequencyTable;
use crate::tree::CodeTreeNode;

/// Symbol -> code mapping produced from a coding tree.
///
/// Generated tables are always prefix-free, since every code is the path to a
/// distinct leaf. A table loaded from disk is only as good as the file it came
/// from; see [`CodeTable::is_prefix_free`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<char, BitString>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the tree, appending 0 for each left branch and 1 for each right.
    pub fn from_tree(root: &CodeTreeNode) -> Self {
        let mut table = CodeTable::new();
        match root {
            // A lone leaf would get an empty path, which cannot be packed.
            CodeTreeNode::Leaf { symbol, .. } => {
                table.insert(*symbol, BitString::from(vec![false]));
            }
            CodeTreeNode::Internal { .. } => {
                build_codes_recursive(root, BitString::new(), &mut table);
            }
        }
        table
    }

    pub fn insert(&mut self, symbol: char, code: BitString) -> Option<BitString> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: char) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &BitString)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Code -> symbol, the lookup used for decoding.
    pub fn inverse(&self) -> HashMap<&BitString, char> {
        self.codes.iter().map(|(&symbol, code)| (code, symbol)).collect()
    }

    /// True when no code is empty and no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitString> = self.codes.values().collect();
        if codes.iter().any(|code| code.is_empty()) {
            return false;
        }
        // After sorting, a prefix always sorts directly before some code it
        // prefixes, so checking neighbours is enough.
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Mean bits per symbol when encoding a text with these frequencies.
    pub fn average_code_length(&self, frequencies: &FrequencyTable) -> f64 {
        let total = frequencies.total();
        if total == 0 {
            return 0.0;
        }
        let bits: usize = frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() * count))
            .sum();
        bits as f64 / total as f64
    }
}

/// Code table for an optional tree; no tree gives an empty table.
pub fn generate_codes(root: Option<&CodeTreeNode>) -> CodeTable {
    root.map(CodeTable::from_tree).unwrap_or_default()
}

fn build_codes_recursive(node: &CodeTreeNode, prefix: BitString, table: &mut CodeTable) {
    match node {
        CodeTreeNode::Leaf { symbol, .. } => {
            table.insert(*symbol, prefix);
        }
        CodeTreeNode::Internal { left, right, .. } => {
            build_codes_recursive(left, prefix.with_bit(false), table);
            build_codes_recursive(right, prefix.with_bit(true), table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn code(table: &CodeTable, symbol: char) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn no_tree_gives_empty_table() {
        assert!(generate_codes(None).is_empty());
    }

    #[test]
    fn lone_leaf_gets_code_zero() {
        let table = generate_codes(build_tree("zzzz").as_ref());
        assert_eq!(table.len(), 1);
        assert_eq!(code(&table, 'z'), "0");
    }

    #[test]
    fn heaviest_symbol_gets_shortest_code() {
        let table = generate_codes(build_tree("aabbbcccc").as_ref());
        assert_eq!(code(&table, 'c'), "0");
        assert_eq!(code(&table, 'a'), "10");
        assert_eq!(code(&table, 'b'), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn detects_prefix_violations() {
        let mut table = CodeTable::new();
        table.insert('a', "0".parse().unwrap());
        table.insert('b', "10".parse().unwrap());
        assert!(table.is_prefix_free());
        table.insert('c', "101".parse().unwrap());
        assert!(!table.is_prefix_free());
        table.insert('c', BitString::new());
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn average_length_weights_by_frequency() {
        let text = "aabbbcccc";
        let table = generate_codes(build_tree(text).as_ref());
        let frequencies = FrequencyTable::from_text(text);
        // 2*2 + 3*2 + 4*1 = 14 bits over 9 symbols
        let average = table.average_code_length(&frequencies);
        assert!((average - 14.0 / 9.0).abs() < 1e-9);
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn inverse_maps_codes_back() {
        let table = generate_codes(build_tree("abracadabra").as_ref());
        let inverse = table.inverse();
        assert_eq!(inverse.len(), table.len());
        for (symbol, code) in table.iter() {
            assert_eq!(inverse[code], symbol);
        }
    }
}
