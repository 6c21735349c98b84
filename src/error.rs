// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    #[error("invalid bit {0:?}, expected '0' or '1'")]
    InvalidBit(char),

    #[error("padding of {padding} bits is impossible for a {bytes}-byte payload")]
    InvalidPadding { padding: u8, bytes: usize },

    #[error("{0} trailing bits do not match any code")]
    TrailingBits(usize),
}

impl HuffError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HuffError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
