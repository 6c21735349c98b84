// src/utils.rs

use std::fs;
use std::path::Path;

use crate::error::{HuffError, Result};

/// Read a whole UTF-8 text file, keeping it byte for byte.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| HuffError::io(path, e))
}

/// Write text to a file (overwrite)
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| HuffError::io(path, e))
}

/// Size of a file in bytes, 0 if it does not exist.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Format bytes into human-readable string (e.g. 1024 -> "1.00 KB")
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Space saved by compression, as a percentage of the original size.
pub fn reduction_percent(original: u64, compressed: u64) -> Option<f64> {
    if original == 0 || compressed == 0 {
        return None;
    }
    Some((1.0 - compressed as f64 / original as f64) * 100.0)
}
