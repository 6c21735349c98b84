// src/frequency.rs

use std::collections::HashMap;

/// Symbol counts for one input, kept in first-occurrence order.
///
/// The order matters: the tree builder numbers leaves in this order to break
/// ties between equal weights, which keeps the generated codes reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, usize)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every symbol of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        for symbol in text.chars() {
            table.add(symbol);
        }
        table
    }

    pub fn add(&mut self, symbol: char) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    pub fn get(&self, symbol: char) -> usize {
        self.index
            .get(&symbol)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the input length in symbols.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.add(symbol);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_seen_order() {
        let table = FrequencyTable::from_text("banana");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![('b', 1), ('a', 3), ('n', 2)]);
        assert_eq!(table.total(), 6);
        assert_eq!(table.get('z'), 0);
    }

    #[test]
    fn empty_text_has_no_symbols() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn counts_unicode_scalars() {
        let table: FrequencyTable = "ñañ€".chars().collect();
        assert_eq!(table.get('ñ'), 2);
        assert_eq!(table.get('€'), 1);
        assert_eq!(table.len(), 3);
    }
}
