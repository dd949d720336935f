//! huffman/code_table.rs
//! Codewords, the symbol -> code table and its inverse for decoding.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::compression::CompressionError;
use crate::constants::MAX_CODE_LEN;
use crate::huffman::tree::{HuffNode, HuffmanTree};

/// A codeword: `len` bits held MSB-first in the low bits of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Zero-length code, the starting point of a tree walk or a decode.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    pub fn new(bits: u64, len: u8) -> Result<Self, CompressionError> {
        if len > MAX_CODE_LEN {
            return Err(CompressionError::CodeTooLong { len: len as usize });
        }
        if len < MAX_CODE_LEN && bits >> len != 0 {
            return Err(CompressionError::malformed(format!(
                "code value {:#x} does not fit in {} bits", bits, len
            )));
        }
        Ok(Code { bits, len })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit. `None` once the code is already `MAX_CODE_LEN` long.
    pub fn push(self, bit: bool) -> Option<Code> {
        if self.len >= MAX_CODE_LEN {
            return None;
        }
        Some(Code { bits: (self.bits << 1) | bit as u64, len: self.len + 1 })
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        if self.len == 0 {
            return true;
        }
        other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    /// Textual `0`/`1` form, most significant bit first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CompressionError::malformed("empty code string"));
        }
        if s.len() > MAX_CODE_LEN as usize {
            return Err(CompressionError::CodeTooLong { len: s.len() });
        }
        let mut code = Code::EMPTY;
        for c in s.chars() {
            let bit = match c {
                '0' => false,
                '1' => true,
                other => {
                    return Err(CompressionError::malformed(format!(
                        "invalid character {:?} in code {:?}", other, s
                    )))
                }
            };
            code = code.push(bit).ok_or(CompressionError::CodeTooLong { len: s.len() })?;
        }
        Ok(code)
    }
}

/// Symbol -> codeword mapping, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth-first walk: left appends `0`, right appends `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self, CompressionError> {
        let depth = tree.depth();
        if depth > MAX_CODE_LEN as usize {
            return Err(CompressionError::CodeTooLong { len: depth });
        }

        let mut table = CodeTable::new();
        match &tree.root {
            // A bare leaf root has no path; give it a one-bit code like the
            // builder's single-symbol shape would.
            HuffNode::Leaf { byte, .. } => {
                table.codes.insert(*byte, Code { bits: 0, len: 1 });
            }
            root => collect_codes(root, Code::EMPTY, &mut table.codes),
        }

        debug!(symbols = table.len(), max_len = table.max_len(), "generated code table");
        Ok(table)
    }

    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&s, &c)| (s, c))
    }

    pub fn max_len(&self) -> u8 {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// True when no code is a prefix of (or equal to) another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.codes.values().copied().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes.iter().skip(i + 1).all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }

    pub fn inverse(&self) -> DecodeTable {
        DecodeTable {
            symbols: self.codes.iter().map(|(&s, &c)| (c, s)).collect(),
            max_len: self.max_len(),
        }
    }
}

fn collect_codes(node: &HuffNode, prefix: Code, out: &mut BTreeMap<u8, Code>) {
    match node {
        HuffNode::Leaf { byte, .. } => {
            out.insert(*byte, prefix);
        }
        HuffNode::Internal { left, right, .. } => {
            // Depth was checked against MAX_CODE_LEN before the walk.
            if let (Some(l), Some(r)) = (prefix.push(false), prefix.push(true)) {
                collect_codes(left, l, out);
                collect_codes(right, r, out);
            }
        }
        HuffNode::Sentinel => {}
    }
}

/// Codeword -> symbol lookup used by the unpacker.
#[derive(Debug, Clone, Default)]
pub struct DecodeTable {
    symbols: HashMap<Code, u8>,
    max_len: u8,
}

impl DecodeTable {
    pub fn lookup(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::frequency::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn example_codes_favor_frequent_symbols() {
        let table = table_for(b"aaaabbbcc");
        assert_eq!(table.get(b'a').unwrap().to_string(), "0");
        assert_eq!(table.get(b'c').unwrap().to_string(), "10");
        assert_eq!(table.get(b'b').unwrap().to_string(), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn single_symbol_code_is_one_bit() {
        let table = table_for(&[7u8; 32]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(7).unwrap().to_string(), "0");
    }

    #[test]
    fn all_byte_values_get_eight_bit_codes() {
        let data: Vec<u8> = (0..=255).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.iter().all(|(_, c)| c.len() == 8));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn code_text_roundtrip_and_rejects_garbage() {
        let code: Code = "0110".parse().unwrap();
        assert_eq!(code.bits(), 0b0110);
        assert_eq!(code.len(), 4);
        assert_eq!(code.to_string(), "0110");

        assert!("".parse::<Code>().is_err());
        assert!("012".parse::<Code>().is_err());
        assert!(matches!(
            "1".repeat(65).parse::<Code>(),
            Err(CompressionError::CodeTooLong { len: 65 })
        ));
        assert_eq!("1".repeat(64).parse::<Code>().unwrap().bits(), u64::MAX);
    }

    #[test]
    fn prefix_relation() {
        let a: Code = "10".parse().unwrap();
        let b: Code = "101".parse().unwrap();
        let c: Code = "11".parse().unwrap();
        assert!(a.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
        assert!(!a.is_prefix_of(&c));
        assert!(Code::EMPTY.is_prefix_of(&c));
    }

    #[test]
    fn detects_non_prefix_free_tables() {
        let mut table = CodeTable::new();
        table.insert(1, "0".parse().unwrap());
        table.insert(2, "01".parse().unwrap());
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn new_rejects_values_wider_than_length() {
        assert!(Code::new(0b100, 2).is_err());
        assert!(Code::new(0b10, 2).is_ok());
        assert!(Code::new(u64::MAX, 64).is_ok());
        assert!(Code::new(0, 65).is_err());
    }

    #[test]
    fn inverse_maps_codes_back() {
        let table = table_for(b"aaaabbbcc");
        let inverse = table.inverse();
        assert_eq!(inverse.max_len(), 2);
        for (symbol, code) in table.iter() {
            assert_eq!(inverse.lookup(&code), Some(symbol));
        }
    }
}
