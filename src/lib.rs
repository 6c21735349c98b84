//! # huffpack
//!
//! Huffman compression for text, with a small self-describing file format.
//!
//! ```rust
//! use huffpack::{codec, Artifact};
//!
//! let compressed = codec::compress("aabbbcccc");
//! let artifact = Artifact::new(compressed);
//!
//! let bytes = artifact.to_bytes()?;
//! let restored = Artifact::from_bytes(&bytes)?;
//! assert_eq!(restored.decompress(false)?, "aabbbcccc");
//! # Ok::<(), huffpack::HuffError>(())
//! ```

pub mod analyzer;
pub mod artifact;
pub mod bits;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod tree;
pub mod utils;

pub use artifact::Artifact;
pub use bits::{BitString, pack, unpack};
pub use codec::{Compressed, compress, decompress_by_table, decompress_strict};
pub use codes::{CodeTable, generate_codes};
pub use error::{HuffError, Result};
pub use frequency::FrequencyTable;
pub use tree::{CodeTreeNode, build_tree};
