use std::fmt;
use std::str::FromStr;

use crate::error::HuffmanError;

/// A prefix code: a bit sequence packed most-significant-bit first.
///
/// Renders and parses as a string of `'0'`/`'1'`, the form used in the file header.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<u8>,
    bit_count: usize,
}

impl Code {
    pub fn new() -> Self {
        Code {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_count % 8;
        if offset == 0 {
            self.bits.push(0);
        }
        if let (true, Some(last)) = (bit, self.bits.last_mut()) {
            *last |= 0x80 >> offset;
        }
        self.bit_count += 1;
    }

    /// Copy of this code with one more bit appended.
    pub fn with_bit(&self, bit: bool) -> Code {
        let mut code = self.clone();
        code.push_bit(bit);
        code
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).filter_map(move |i| self.bit(i))
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl FromIterator<bool> for Code {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut code = Code::new();
        for bit in iter {
            code.push_bit(bit);
        }
        code
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffmanError::malformed(format!(
                    "invalid bit {other:?} in code {s:?}"
                ))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_bits_across_bytes() {
        let code: Code = "1010110011".parse().unwrap();
        assert_eq!(code.len(), 10);
        assert_eq!(code.bits, vec![0b1010_1100, 0b1100_0000]);
        assert_eq!(code.to_string(), "1010110011");
    }

    #[test]
    fn test_push_bit_opens_byte_on_boundary() {
        let mut code = Code::new();
        for _ in 0..8 {
            code.push_bit(true);
        }
        assert_eq!(code.bits, vec![0xFF]);

        code.push_bit(false);
        assert_eq!(code.bits, vec![0xFF, 0x00]);
        code.push_bit(true);
        assert_eq!(code.bits, vec![0xFF, 0x40]);
        assert_eq!(code.len(), 10);
        assert_eq!(code.to_string(), "1111111101");
    }

    #[test]
    fn test_rejects_non_binary() {
        let err = "01a".parse::<Code>().unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedHeader(_)));
    }

    #[test]
    fn test_prefix() {
        let short: Code = "01".parse().unwrap();
        let long: Code = "011".parse().unwrap();
        let other: Code = "10".parse().unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(!short.is_prefix_of(&other));
        assert!(Code::new().is_prefix_of(&other));
    }

    #[test]
    fn test_with_bit_leaves_original() {
        let base: Code = "1".parse().unwrap();
        let left = base.with_bit(false);
        assert_eq!(base.to_string(), "1");
        assert_eq!(left.to_string(), "10");
        assert_eq!(left.bit(1), Some(false));
        assert_eq!(left.bit(2), None);
    }
}
