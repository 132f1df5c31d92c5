//! Text header that precedes the bit payload:
//!
//! ```text
//! <total symbol count>
//! <dictionary size>
//! <symbol> <code>[ //<char>]     one line per dictionary entry
//! ```

use std::io::{self, BufRead, Write};

use crate::code::Code;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub total_symbols: u64,
    pub code_table: CodeTable,
}

/// Writes the header and returns the number of bytes it took.
pub fn write_header<W: Write>(
    writer: &mut W,
    total_symbols: u64,
    table: &CodeTable,
    annotate_printable: bool,
) -> io::Result<u64> {
    let mut text = Vec::new();
    writeln!(text, "{total_symbols}")?;
    writeln!(text, "{}", table.len())?;
    for (symbol, code) in table.iter() {
        write!(text, "{symbol} {code}")?;
        if annotate_printable && symbol.is_ascii_graphic() {
            write!(text, " //{}", symbol as char)?;
        }
        text.push(b'\n');
    }
    writer.write_all(&text)?;
    Ok(text.len() as u64)
}

/// Reads the header, leaving `reader` positioned at the first payload byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Header> {
    let total_symbols = read_count(reader, "total symbol count")?;
    let dictionary_size = read_count(reader, "dictionary size")?;
    if dictionary_size > 256 {
        return Err(HuffmanError::malformed(format!(
            "dictionary size {dictionary_size} exceeds 256 entries"
        )));
    }

    let mut code_table = CodeTable::new();
    for index in 0..dictionary_size {
        let line = read_line(reader)?.ok_or_else(|| {
            HuffmanError::malformed(format!(
                "dictionary ended after {index} of {dictionary_size} entries"
            ))
        })?;
        let (symbol, code) = parse_entry(&line)?;
        code_table.insert(symbol, code);
    }

    Ok(Header {
        total_symbols,
        code_table,
    })
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(line))
}

fn read_count<R: BufRead>(reader: &mut R, what: &str) -> Result<u64> {
    let line = read_line(reader)?
        .ok_or_else(|| HuffmanError::malformed(format!("missing {what}")))?;
    let text = std::str::from_utf8(&line)
        .map_err(|_| HuffmanError::malformed(format!("{what} is not text")))?;
    text.trim()
        .parse()
        .map_err(|_| HuffmanError::malformed(format!("{what} {:?} is not an integer", text.trim())))
}

// Only the first two tokens count; trailing annotation bytes need not be UTF-8.
fn parse_entry(line: &[u8]) -> Result<(u8, Code)> {
    let mut tokens = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());

    let symbol_token = tokens
        .next()
        .ok_or_else(|| HuffmanError::malformed("empty dictionary line"))?;
    let symbol = std::str::from_utf8(symbol_token)
        .ok()
        .and_then(|s| s.parse::<u8>().ok())
        .ok_or_else(|| {
            HuffmanError::malformed(format!(
                "symbol {:?} is not a byte value",
                String::from_utf8_lossy(symbol_token)
            ))
        })?;

    let code_token = tokens
        .next()
        .ok_or_else(|| HuffmanError::malformed(format!("symbol {symbol} has no code")))?;
    let code = std::str::from_utf8(code_token)
        .map_err(|_| HuffmanError::malformed(format!("code for symbol {symbol} is not text")))?
        .parse::<Code>()?;
    Ok((symbol, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        let mut t = CodeTable::new();
        for (symbol, code) in entries {
            t.insert(*symbol, code.parse().unwrap());
        }
        t
    }

    #[test]
    fn test_write_layout() {
        let t = table(&[(b'A', "0"), (b' ', "10"), (b'C', "11")]);
        let mut out = Vec::new();
        let written = write_header(&mut out, 6, &t, true).unwrap();
        assert_eq!(written, out.len() as u64);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "6\n3\n32 10\n65 0 //A\n67 11 //C\n"
        );
    }

    #[test]
    fn test_write_without_annotation() {
        let t = table(&[(b'A', "0"), (b'B', "1")]);
        let mut out = Vec::new();
        write_header(&mut out, 2, &t, false).unwrap();
        assert_eq!(out, b"2\n2\n65 0\n66 1\n");
    }

    #[test]
    fn test_read_stops_at_payload() {
        let mut data = b"6\n3\n65 0 //A\n66 10 //B\n67 11\n".to_vec();
        data.extend_from_slice(&[0x0A, 0xFF]);
        let mut cursor = Cursor::new(data);

        let header = read_header(&mut cursor).unwrap();
        assert_eq!(header.total_symbols, 6);
        assert_eq!(header.code_table, table(&[(65, "0"), (66, "10"), (67, "11")]));

        let mut payload = Vec::new();
        cursor.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, vec![0x0A, 0xFF]);
    }

    #[test]
    fn test_read_ignores_raw_annotation_bytes() {
        let mut data = b"1\n1\n200 0 //".to_vec();
        data.push(200);
        data.extend_from_slice(b"\r\n");
        let header = read_header(&mut Cursor::new(data)).unwrap();
        assert_eq!(header.code_table.get(200).unwrap().to_string(), "0");
    }

    #[test]
    fn test_read_rejects_missing_code() {
        for bad in [&b"4\n1\n65 \n"[..], b"4\n1\n65\n", b"4\n1\n65 //A\n"] {
            let err = read_header(&mut Cursor::new(bad.to_vec())).unwrap_err();
            assert!(matches!(err, HuffmanError::MalformedHeader(_)), "{err}");
        }
    }

    #[test]
    fn test_malformed_counts() {
        for bad in [&b""[..], b"abc\n1\n", b"3\nx\n", b"3\n300\n"] {
            let err = read_header(&mut Cursor::new(bad.to_vec())).unwrap_err();
            assert!(matches!(err, HuffmanError::MalformedHeader(_)), "{err}");
        }
    }

    #[test]
    fn test_malformed_entries() {
        for bad in [&b"3\n2\n65 0\n"[..], b"3\n1\n999 0\n", b"3\n1\n65 02\n", b"3\n1\n\n"] {
            let err = read_header(&mut Cursor::new(bad.to_vec())).unwrap_err();
            assert!(matches!(err, HuffmanError::MalformedHeader(_)), "{err}");
        }
    }
}
