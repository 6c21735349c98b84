// src/codec.rs

use tracing::{debug, warn};

use crate::bits::{self, BitString};
use crate::codes::CodeTable;
use crate::error::{HuffError, Result};
use crate::frequency::FrequencyTable;
use crate::tree;

/// Output of [`compress`]: packed bytes, their padding and the code table
/// needed to read them back. The coding tree is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compressed {
    pub payload: Vec<u8>,
    pub padding: u8,
    pub table: CodeTable,
}

impl Compressed {
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Number of meaningful bits in the payload.
    pub fn bit_len(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(self.padding as usize)
    }

    pub fn bits(&self) -> Result<BitString> {
        bits::unpack(&self.payload, self.padding)
    }

    pub fn decompress(&self) -> Result<String> {
        Ok(decompress_by_table(&self.bits()?, &self.table))
    }
}

/// Huffman-encode `text`.
///
/// Empty text gives an empty payload, zero padding and an empty table; there
/// is nothing to persist in that case.
pub fn compress(text: &str) -> Compressed {
    let frequencies = FrequencyTable::from_text(text);
    let Some(root) = tree::from_frequencies(&frequencies) else {
        return Compressed::default();
    };

    let table = CodeTable::from_tree(&root);
    drop(root);
    debug!(
        symbols = frequencies.total(),
        distinct = frequencies.len(),
        max_code_len = table.max_code_len(),
        "built code table"
    );

    // Every symbol of the text has a leaf, so every lookup below hits.
    debug_assert_eq!(table.len(), frequencies.len());
    let mut encoded = BitString::with_capacity(text.len() * 2);
    for symbol in text.chars() {
        let code = table.get(symbol);
        debug_assert!(code.is_some(), "symbol {symbol:?} missing from its own code table");
        if let Some(code) = code {
            encoded.extend_from(code);
        }
    }

    let (payload, padding) = bits::pack(&encoded);
    debug!(bits = encoded.len(), bytes = payload.len(), padding, "packed payload");

    Compressed {
        payload,
        padding,
        table,
    }
}

/// Decode `encoded` by looking codes up in `table`, never touching a tree.
///
/// `table` must be prefix-free (every generated table is). Bits left over at
/// the end that do not complete a code are dropped; use
/// [`decompress_strict`] to treat them as an error instead.
pub fn decompress_by_table(encoded: &BitString, table: &CodeTable) -> String {
    let (text, leftover) = decode(encoded, table);
    if leftover > 0 {
        warn!(leftover, "dropping trailing bits that match no code");
    }
    text
}

/// Like [`decompress_by_table`] but fails if the input ends mid-code.
pub fn decompress_strict(encoded: &BitString, table: &CodeTable) -> Result<String> {
    match decode(encoded, table) {
        (text, 0) => Ok(text),
        (_, leftover) => Err(HuffError::TrailingBits(leftover)),
    }
}

// Returns the decoded text and the length of any unmatched tail.
fn decode(encoded: &BitString, table: &CodeTable) -> (String, usize) {
    if encoded.is_empty() || table.is_empty() {
        return (String::new(), 0);
    }
    debug_assert!(table.is_prefix_free(), "decoding needs a prefix-free table");

    let inverse = table.inverse();
    let mut text = String::new();
    let mut candidate = BitString::with_capacity(table.max_code_len());

    for bit in encoded.iter() {
        candidate.push(bit);
        if let Some(&symbol) = inverse.get(&candidate) {
            text.push(symbol);
            candidate = BitString::with_capacity(table.max_code_len());
        }
    }

    (text, candidate.len())
}
