// src/artifact.rs

use std::{
    ffi::OsString,
    fs,
    io::{self, Cursor},
    path::{Path, PathBuf},
};

use bincode::Options;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bits::{self, BitString};
use crate::codec::{self, Compressed};
use crate::codes::CodeTable;
use crate::error::{HuffError, Result};

pub const DEFAULT_ARTIFACT_EXT: &str = "huf";
const TEMP_EXT: &str = "tmp"; // For atomic writes
const MAGIC: [u8; 4] = *b"HUFP";
const VERSION: u8 = 1;

// Metadata block at the start of every artifact. Everything after it is payload.
#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u8,
    created_at: String,
    padding: u8,
    table: CodeTable,
}

/// A compressed text as stored on disk: padding, code table and packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub created_at: String,
    pub padding: u8,
    pub table: CodeTable,
    pub payload: Vec<u8>,
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

impl Artifact {
    pub fn new(compressed: Compressed) -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            padding: compressed.padding,
            table: compressed.table,
            payload: compressed.payload,
        }
    }

    /// Encode as `[bincode header][payload]`. The header needs no length
    /// prefix because bincode knows where it ends.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let header = Header {
            magic: MAGIC,
            version: VERSION,
            created_at: self.created_at.clone(),
            padding: self.padding,
            table: self.table.clone(),
        };
        let mut data = bincode_options()
            .serialize(&header)
            .map_err(|e| HuffError::CorruptArtifact(format!("failed to serialize header: {e}")))?;
        data.extend_from_slice(&self.payload);
        Ok(data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let header: Header = bincode_options()
            .with_limit(data.len() as u64)
            .deserialize_from(&mut cursor)
            .map_err(|e| HuffError::CorruptArtifact(format!("failed to read header: {e}")))?;

        if header.magic != MAGIC {
            return Err(HuffError::CorruptArtifact(format!("bad magic {:?}", header.magic)));
        }
        if header.version != VERSION {
            return Err(HuffError::CorruptArtifact(format!(
                "unsupported version {}",
                header.version
            )));
        }

        let payload = data[cursor.position() as usize..].to_vec();
        if header.padding > 7 || (payload.is_empty() && header.padding > 0) {
            return Err(HuffError::CorruptArtifact(format!(
                "padding {} does not fit a {}-byte payload",
                header.padding,
                payload.len()
            )));
        }
        if !header.table.is_prefix_free() {
            return Err(HuffError::CorruptArtifact(
                "code table is not prefix-free".to_string(),
            ));
        }

        Ok(Self {
            created_at: header.created_at,
            padding: header.padding,
            table: header.table,
            payload,
        })
    }

    /// Write the artifact to `path` via a temporary file and a rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let temp_path = temp_path_for(path);
        let data = self.to_bytes()?;

        if let Err(e) = fs::write(&temp_path, &data) {
            discard_temp(&temp_path);
            return Err(HuffError::io(&temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            discard_temp(&temp_path);
            return Err(HuffError::io(path, e));
        }

        info!(
            path = %path.display(),
            bytes = data.len(),
            codes = self.table.len(),
            "artifact saved"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| HuffError::io(path, e))?;
        let artifact = Self::from_bytes(&data)?;
        info!(
            path = %path.display(),
            bytes = data.len(),
            payload = artifact.payload.len(),
            "artifact loaded"
        );
        Ok(artifact)
    }

    pub fn bit_len(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(self.padding as usize)
    }

    /// The encoded bit string with padding removed.
    pub fn bits(&self) -> Result<BitString> {
        bits::unpack(&self.payload, self.padding)
    }

    /// Decode back to text. With `strict`, a dangling partial code is an error.
    pub fn decompress(&self, strict: bool) -> Result<String> {
        let bits = self.bits()?;
        if strict {
            codec::decompress_strict(&bits, &self.table)
        } else {
            Ok(codec::decompress_by_table(&bits, &self.table))
        }
    }

    pub fn into_compressed(self) -> Compressed {
        Compressed {
            payload: self.payload,
            padding: self.padding,
            table: self.table,
        }
    }
}

// Best effort; a partial temp file must not outlive a failed save.
fn discard_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %temp_path.display(), error = %e, "could not remove temp file");
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(TEMP_EXT);
    PathBuf::from(name)
}
