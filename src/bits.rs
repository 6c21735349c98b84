// src/bits.rs

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{HuffError, Result};

/// An ordered run of binary digits.
///
/// Used both for a single symbol's code and for a whole encoded text. The
/// textual form is a string of '0' and '1', which is also how codes are
/// written into an artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitString {
            bits: Vec::with_capacity(bits),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    /// Copy of this string with `bit` appended.
    pub fn with_bit(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        BitString { bits }
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        BitString { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        BitString {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffError::InvalidBit(other)),
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct BitStringVisitor;

impl<'de> Visitor<'de> for BitStringVisitor {
    type Value = BitString;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string of '0' and '1'")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<BitString, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_str(BitStringVisitor)
    }
}

/// Accumulates bits MSB-first into bytes.
struct BitWriter {
    buffer: Vec<u8>,
    current_byte: u8,
    bit_pos: u8,
}

impl BitWriter {
    fn with_capacity(bytes: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_pos: 0,
        }
    }

    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.current_byte |= 1 << (7 - self.bit_pos);
        }
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.flush_byte();
        }
    }

    fn flush_byte(&mut self) {
        self.buffer.push(self.current_byte);
        self.current_byte = 0;
        self.bit_pos = 0;
    }

    /// Flush a partial last byte; the unwritten low bits stay zero.
    /// Returns the bytes and how many padding bits were added.
    fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = if self.bit_pos > 0 {
            let padding = 8 - self.bit_pos;
            self.flush_byte();
            padding
        } else {
            0
        };
        (self.buffer, padding)
    }
}

/// Reads bits MSB-first out of a byte slice.
struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.byte_pos)?;
        let bit = (byte & (1 << (7 - self.bit_pos))) != 0;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }
        Some(bit)
    }
}

/// Pack `bits` into bytes, zero-padding the last byte on the right.
///
/// Returns the bytes and the padding count (0..=7), so that
/// `bytes.len() * 8 - padding == bits.len()`.
pub fn pack(bits: &BitString) -> (Vec<u8>, u8) {
    let mut writer = BitWriter::with_capacity(bits.len().div_ceil(8));
    for bit in bits.iter() {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand `bytes` back to bits and drop the trailing `padding` bits.
pub fn unpack(bytes: &[u8], padding: u8) -> Result<BitString> {
    if padding > 7 || (bytes.is_empty() && padding > 0) {
        return Err(HuffError::InvalidPadding {
            padding,
            bytes: bytes.len(),
        });
    }

    let len = bytes.len() * 8 - padding as usize;
    let mut reader = BitReader::new(bytes);
    let mut bits = BitString::with_capacity(len);
    while bits.len() < len {
        match reader.read_bit() {
            Some(bit) => bits.push(bit),
            None => break,
        }
    }
    Ok(bits)
}
