/// Occurrence count of every byte value in one input, plus the total byte count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        FrequencyTable {
            counts,
            total: bytes.len() as u64,
        }
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-zero entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(move |byte| (byte, self.counts[byte as usize]))
            .filter(|&(_, count)| count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"AAABBC");
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.count(b'A'), 3);
        assert_eq!(table.count(b'Z'), 0);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(b'A', 3), (b'B', 2), (b'C', 1)]);
    }

    #[test]
    fn test_extreme_byte_values() {
        let table = FrequencyTable::from_bytes(&[0, 255, 255]);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, 1), (255, 2)]);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
