use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::bit_io::{BitSink, BitSource};
use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{DecodeTree, HuffmanTree};
use crate::metadata::{read_header, write_header, Header};

/// Sizes reported by a successful compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressSummary {
    pub total_symbols: u64,
    pub dictionary_size: usize,
    pub header_bytes: u64,
    pub payload_bits: u64,
    pub payload_bytes: u64,
}

impl CompressSummary {
    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressSummary {
    pub symbols_decoded: u64,
    pub dictionary_size: usize,
}

/// Huffman compressor and decompressor.
///
/// Each call builds its own frequency table and tree and drops them before returning.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        HuffmanCodec { config }
    }

    /// Writes the header and bit payload for `data` to `writer`.
    pub fn encode<W: Write>(&self, data: &[u8], mut writer: W) -> Result<CompressSummary> {
        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        debug!(
            "Counted {} symbols, {} distinct",
            frequencies.total(),
            frequencies.distinct()
        );
        trace!("{tree}");

        let table = tree.generate_table();
        drop(tree);

        let header_bytes = write_header(
            &mut writer,
            frequencies.total(),
            &table,
            self.config.annotate_printable,
        )?;

        let mut sink = BitSink::new(&mut writer);
        for &byte in data {
            let code = table.get(byte).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Byte {byte} not in code table"),
                )
            })?;
            sink.write_code(code)?;
        }
        let payload_bits = sink.bits_written();
        sink.finish()?;
        writer.flush()?;

        let summary = CompressSummary {
            total_symbols: frequencies.total(),
            dictionary_size: table.len(),
            header_bytes,
            payload_bits,
            payload_bytes: payload_bits.div_ceil(8),
        };
        debug!(
            "Encoded {} symbols with {} codes: header {} B, payload {} B",
            summary.total_symbols, summary.dictionary_size, summary.header_bytes, summary.payload_bytes
        );
        Ok(summary)
    }

    /// Reads a framed stream from `reader` and writes the recovered bytes to `writer`.
    pub fn decode<R: BufRead, W: Write>(&self, mut reader: R, writer: W) -> Result<DecompressSummary> {
        let header = read_header(&mut reader)?;
        let tree = DecodeTree::from_code_table(&header.code_table)?;
        decode_body(&header, &tree, reader, writer)
    }

    /// Compresses the file at `input` into `output`.
    ///
    /// Nothing is created at `output` when `input` cannot be read or is empty.
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<CompressSummary> {
        let data = std::fs::read(input).map_err(|e| HuffmanError::unavailable(input, e))?;
        if data.is_empty() {
            warn!("{} is empty, no output written", input.display());
            return Err(HuffmanError::EmptySource);
        }

        let file = File::create(output).map_err(|e| HuffmanError::unavailable(output, e))?;
        let writer = BufWriter::with_capacity(self.config.io_buffer_size, file);
        let summary = self.encode(&data, writer)?;
        debug!("Compressed {} -> {}", input.display(), output.display());
        Ok(summary)
    }

    /// Decompresses the file at `input` into `output`.
    ///
    /// `output` is created only once the header has been parsed and the tree rebuilt.
    /// When the payload is truncated or corrupt, whatever was decoded stays in `output`.
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<DecompressSummary> {
        let file = File::open(input).map_err(|e| HuffmanError::unavailable(input, e))?;
        let mut reader = BufReader::with_capacity(self.config.io_buffer_size, file);

        let header = read_header(&mut reader)?;
        let tree = DecodeTree::from_code_table(&header.code_table)?;
        debug!(
            "Rebuilt decode tree from {} entries ({} nodes)",
            header.code_table.len(),
            tree.node_count()
        );

        let file = File::create(output).map_err(|e| HuffmanError::unavailable(output, e))?;
        let writer = BufWriter::with_capacity(self.config.io_buffer_size, file);
        let summary = decode_body(&header, &tree, reader, writer)?;
        debug!("Decompressed {} -> {}", input.display(), output.display());
        Ok(summary)
    }
}

fn decode_body<R: Read, W: Write>(
    header: &Header,
    tree: &DecodeTree,
    reader: R,
    mut writer: W,
) -> Result<DecompressSummary> {
    let outcome = decode_payload(tree, header.total_symbols, reader, &mut writer);
    // partial output is kept, so flush before reporting
    let flushed = writer.flush();
    let symbols_decoded = outcome.inspect_err(|e| warn!("Decoding stopped: {e}"))?;
    flushed?;

    Ok(DecompressSummary {
        symbols_decoded,
        dictionary_size: header.code_table.len(),
    })
}

fn decode_payload<R: Read, W: Write>(
    tree: &DecodeTree,
    expected: u64,
    reader: R,
    writer: &mut W,
) -> Result<u64> {
    let mut source = BitSource::new(reader);
    let mut cursor = DecodeTree::ROOT;
    let mut decoded = 0u64;

    while decoded < expected {
        let bit = source
            .read_bit()?
            .ok_or(HuffmanError::TruncatedPayload { decoded, expected })?;
        cursor = tree
            .child(cursor, bit)
            .ok_or(HuffmanError::StructuralCorruption { decoded })?;

        if tree.is_leaf(cursor) {
            let symbol = tree
                .symbol(cursor)
                .ok_or(HuffmanError::StructuralCorruption { decoded })?;
            writer.write_all(&[symbol])?;
            decoded += 1;
            cursor = DecodeTree::ROOT;
        }
    }
    Ok(decoded)
}
