// src/analyzer.rs

use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_TOP_N: usize = 25;

/// Sparse term-document counts keyed by `(document index, term index)`.
pub type SparseMatrix = HashMap<(usize, usize), usize>;

/// Builds term-frequency matrices over a vocabulary of lowercased words.
#[derive(Debug, Default)]
pub struct TermAnalyzer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
}

/// Lowercase, strip '.' and ',', split on whitespace (newlines included).
pub fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    document.split_whitespace().filter_map(|word| {
        let token: String = word
            .chars()
            .filter(|c| *c != '.' && *c != ',')
            .flat_map(char::to_lowercase)
            .collect();
        (!token.is_empty()).then_some(token)
    })
}

impl TermAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    // New terms are indexed in sorted order after any already known.
    fn build_vocabulary(&mut self, documents: &[&str]) {
        let unique: BTreeSet<String> = documents.iter().flat_map(|doc| tokenize(doc)).collect();
        for term in unique {
            if !self.vocabulary.contains_key(&term) {
                self.vocabulary.insert(term.clone(), self.terms.len());
                self.terms.push(term);
            }
        }
    }

    /// Count every term of every document.
    pub fn build_frequency_matrix(&mut self, documents: &[&str]) -> SparseMatrix {
        self.build_vocabulary(documents);

        let mut matrix = SparseMatrix::new();
        for (doc_id, document) in documents.iter().enumerate() {
            for token in tokenize(document) {
                if let Some(&term_id) = self.vocabulary.get(&token) {
                    *matrix.entry((doc_id, term_id)).or_insert(0) += 1;
                }
            }
        }
        matrix
    }

    /// The `n` most frequent terms, summed over documents. Ties sort by term.
    pub fn top_frequencies(&self, matrix: &SparseMatrix, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for (&(_, term_id), &count) in matrix {
            *counts.entry(term_id).or_insert(0) += count;
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .filter_map(|(term_id, count)| self.term(term_id).map(|t| (t.to_string(), count)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub rank: usize,
    pub original: Option<(String, usize)>,
    pub restored: Option<(String, usize)>,
}

impl ComparisonRow {
    pub fn matches(&self) -> bool {
        self.original == self.restored
    }
}

/// Side-by-side ranking of the top terms of two texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub top_n: usize,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn matches(&self) -> usize {
        self.rows.iter().filter(|row| row.matches()).count()
    }

    pub fn mismatches(&self) -> usize {
        self.rows.len() - self.matches()
    }

    pub fn is_identical(&self) -> bool {
        self.mismatches() == 0
    }
}

/// Rank the top `top_n` terms of each text and pair them up position by position.
pub fn compare_texts(original: &str, restored: &str, top_n: usize) -> Comparison {
    let top = |text: &str| {
        let mut analyzer = TermAnalyzer::new();
        let matrix = analyzer.build_frequency_matrix(&[text]);
        analyzer.top_frequencies(&matrix, top_n)
    };
    let mut left = top(original).into_iter();
    let mut right = top(restored).into_iter();

    let rows = (1..=top_n)
        .map(|rank| ComparisonRow {
            rank,
            original: left.next(),
            restored: right.next(),
        })
        .collect();

    Comparison { top_n, rows }
}
