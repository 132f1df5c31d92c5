//! # huffpack
//!
//! Lossless Huffman file compression built on a generic binary min-heap.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Compress a file
//! huffpack::compress(Path::new("input.txt"), Path::new("compressed.huff"))?;
//!
//! // Decompress a file
//! huffpack::decompress(Path::new("compressed.huff"), Path::new("output.txt"))?;
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! The priority queue is usable on its own:
//!
//! ```
//! use huffpack::MinPriorityQueue;
//!
//! let mut queue = MinPriorityQueue::new();
//! queue.insert("later", 5);
//! queue.insert("sooner", 1);
//! assert_eq!(queue.extract_min(), Ok("sooner"));
//! ```

use std::path::Path;

pub mod bit_io;
pub mod code;
pub mod code_table;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;
pub mod min_heap;
pub mod queue_script;

// Re-export main types for convenience
pub use code::Code;
pub use code_table::CodeTable;
pub use config::CodecConfig;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{CompressSummary, DecompressSummary, HuffmanCodec};
pub use hufftree::{DecodeTree, HuffNode, HuffmanTree};
pub use min_heap::{MinPriorityQueue, QueueError};
pub use queue_script::{QueueOp, ScriptQueue};

/// Compresses `input` into `output` with the default configuration.
pub fn compress(input: &Path, output: &Path) -> Result<CompressSummary> {
    HuffmanCodec::default().compress_file(input, output)
}

/// Decompresses `input` into `output` with the default configuration.
pub fn decompress(input: &Path, output: &Path) -> Result<DecompressSummary> {
    HuffmanCodec::default().decompress_file(input, output)
}
