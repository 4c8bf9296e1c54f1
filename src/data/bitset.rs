use crate::error::{BitgenesError, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Fixed-length sequence of bits.
///
/// A `Bitset` is a view `(storage, offset, len)` onto shared storage:
///
/// - [`Bitset::slice`] returns a view onto a sub-range of the same storage, so
///   writes through the slice show up in the parent and vice versa.
/// - `Clone` is shallow: the clone is another view onto the same bits. This is
///   what lets a mating pipeline start from its parents' bits without copying.
/// - [`Bitset::copy`] allocates fresh storage with identical contents.
///
/// Bits are atomics so a genome's bits can be read by an evaluation worker
/// while other genomes are being built on the main thread.
#[derive(Clone)]
pub struct Bitset {
    storage: Arc<[AtomicBool]>,
    offset: usize,
    len: usize,
}

impl Bitset {
    /// Create a zero-filled bitset of `size` bits.
    pub fn new(size: usize) -> Self {
        let storage: Arc<[AtomicBool]> = (0..size).map(|_| AtomicBool::new(false)).collect();
        Self {
            storage,
            offset: 0,
            len: size,
        }
    }

    /// Create a bitset holding `bits` in order.
    pub fn from_bits(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        Ok(self.bit(index))
    }

    /// Set the bit at `index`. Out-of-range writes leave the bitset untouched.
    pub fn set(&self, index: usize, value: bool) -> Result<()> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        self.put(index, value);
        Ok(())
    }

    pub fn flip(&self, index: usize) -> Result<()> {
        let value = self.get(index)?;
        self.put(index, !value);
        Ok(())
    }

    pub fn set_all(&self, value: bool) {
        for i in 0..self.len {
            self.put(i, value);
        }
    }

    /// Fully independent copy of this bitset's contents.
    pub fn copy(&self) -> Bitset {
        self.iter().collect()
    }

    /// View onto `[start, start + len)`; shares storage with `self`.
    pub fn slice(&self, start: usize, len: usize) -> Result<Bitset> {
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.len {
            return Err(BitgenesError::InvalidSlice {
                start,
                end,
                size: self.len,
            });
        }
        Ok(Self {
            storage: Arc::clone(&self.storage),
            offset: self.offset + start,
            len,
        })
    }

    /// True when both bitsets are views onto the same underlying storage.
    pub fn shares_storage(&self, other: &Bitset) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    pub fn count_ones(&self) -> usize {
        self.iter().filter(|bit| *bit).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Pack the bits into an integer, least significant bit first.
    pub fn to_u64(&self) -> Result<u64> {
        if self.len > 64 {
            return Err(BitgenesError::FieldTooWide { width: self.len });
        }
        Ok(self
            .iter()
            .enumerate()
            .filter(|(_, bit)| *bit)
            .fold(0u64, |acc, (i, _)| acc | (1 << i)))
    }

    // Callers guarantee `index < self.len`.
    pub(crate) fn bit(&self, index: usize) -> bool {
        self.storage[self.offset + index].load(Ordering::Relaxed)
    }

    pub(crate) fn put(&self, index: usize, value: bool) {
        self.storage[self.offset + index].store(value, Ordering::Relaxed);
    }

    fn out_of_range(&self, index: usize) -> BitgenesError {
        BitgenesError::OutOfRange {
            index,
            size: self.len,
        }
    }
}

impl FromIterator<bool> for Bitset {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let storage: Arc<[AtomicBool]> = iter.into_iter().map(AtomicBool::new).collect();
        let len = storage.len();
        Self {
            storage,
            offset: 0,
            len,
        }
    }
}

impl Default for Bitset {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for Bitset {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Bitset {}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = self.iter().map(|bit| if bit { '1' } else { '0' }).collect();
        write!(f, "Bitset({})", bits)
    }
}
