//! Memory and registers of the VC8000.
//!
//! The machine has 1,000,000 words of memory and 10 general registers,
//! all architecturally zero-initialized. A word is a signed integer;
//! assembled instruction words are always 9 decimal digits, but `DC`
//! constants and runtime arithmetic can produce any value.

use std::ops::{Index, IndexMut};

/// The number of memory words.
pub const MEM_SIZE: usize = 1_000_000;
/// The number of general registers.
pub const REG_COUNT: usize = 10;

/// The machine's memory: [`MEM_SIZE`] words, all starting at zero.
///
/// The backing array lives on the heap; it is far too large for the
/// stack.
pub struct MemArray {
    data: Box<[i64]>,
}

impl MemArray {
    /// Creates a zeroed memory array.
    pub fn new() -> Self {
        MemArray {
            data: vec![0; MEM_SIZE].into_boxed_slice(),
        }
    }
}
impl Default for MemArray {
    fn default() -> Self {
        Self::new()
    }
}
impl Index<usize> for MemArray {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}
impl IndexMut<usize> for MemArray {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
impl std::fmt::Debug for MemArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // A million zeroes is not a useful Debug dump; show only the
        // populated cells.
        f.debug_map()
            .entries(
                self.data
                    .iter()
                    .enumerate()
                    .filter(|&(_, &w)| w != 0)
                    .map(|(i, &w)| (i, w)),
            )
            .finish()
    }
}

/// The machine's register file: [`REG_COUNT`] words, all starting at
/// zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegFile {
    data: [i64; REG_COUNT],
}

impl RegFile {
    /// Creates a zeroed register file.
    pub fn new() -> Self {
        Self::default()
    }
}
impl Index<usize> for RegFile {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}
impl IndexMut<usize> for RegFile {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::{MemArray, RegFile};

    #[test]
    fn test_zero_initialized() {
        let mem = MemArray::new();
        assert_eq!(mem[0], 0);
        assert_eq!(mem[999_999], 0);

        let regs = RegFile::new();
        assert_eq!(regs[0], 0);
        assert_eq!(regs[9], 0);
    }

    #[test]
    fn test_read_write() {
        let mut mem = MemArray::new();
        mem[42] = -17;
        assert_eq!(mem[42], -17);

        let mut regs = RegFile::new();
        regs[3] = 5;
        assert_eq!(regs[3], 5);
    }
}
