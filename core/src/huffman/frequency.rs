//! huffman/frequency.rs
//! Byte occurrence counts.

use std::collections::BTreeMap;

/// Occurrence count per byte value. Only symbols present in the input appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut dense = [0u64; crate::constants::SYMBOL_COUNT];
        for &b in bytes {
            dense[b as usize] += 1;
        }

        let counts = dense
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
            .collect();

        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the input length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Zero counts are dropped; repeated symbols accumulate.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter.into_iter().filter(|(_, c)| *c > 0) {
            *counts.entry(symbol).or_insert(0) += count;
        }
        FrequencyTable { counts }
    }
}
