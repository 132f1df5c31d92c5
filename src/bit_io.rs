//! MSB-first bit packing for the payload section.
//! The header is text and never goes through these adapters.

use std::io::{self, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code::Code;

/// Packs bits into bytes, most significant bit first.
pub struct BitSink<W: Write> {
    writer: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitSink<W> {
    pub fn new(writer: W) -> Self {
        BitSink {
            writer: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.writer.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for bit in code.iter() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero-pads and emits the trailing partial byte, then hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.byte_align()?;
        Ok(self.writer.into_writer())
    }
}

/// Yields bits most significant first, pulling a byte only when the previous one is used up.
pub struct BitSource<R: Read> {
    reader: BitReader<R, BigEndian>,
}

impl<R: Read> BitSource<R> {
    pub fn new(reader: R) -> Self {
        BitSource {
            reader: BitReader::endian(reader, BigEndian),
        }
    }

    /// Next bit, or `None` once the underlying stream has no more bytes.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        match self.reader.read_bit() {
            Ok(bit) => Ok(Some(bit)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}
