//! BitArray - Dynamically resizable bit array using 64-bit entries.
//!
//! This module provides an uncompressed bit array whose storage grows on
//! demand. Bits are packed into a table of 64-bit entries and every bit past
//! the end of the table reads as 0, so the array behaves like an infinite
//! sequence of zeros with a finite number of set bits.
//!
//! # Design
//!
//! - Uses `Vec<u64>` for storage (the table)
//! - Bit indexing: entry_idx = bit_idx / 64, offset = bit_idx % 64
//! - The table grows lazily on writes and is trimmed after every write, so it
//!   never ends in a zero entry
//! - Bitwise operations zero-pad the shorter operand and combine entry-wise
//!
//! # Examples
//!
//! ```
//! use bit_array::BitArray;
//!
//! let mut ba = BitArray::new();
//! ba.set(5, true);
//! ba.set(130, true);
//! assert_eq!(ba.size(), 3);
//! assert_eq!(ba.get_acts(), vec![5, 130]);
//!
//! ba.set(130, false);
//! assert_eq!(ba.size(), 1);
//! ```

use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::error::{BitArrayError, Result};

/// Entry type for bit storage (64-bit unsigned integer)
pub type Entry = u64;

/// Number of bits per entry
pub const ENTRY_BITS: usize = Entry::BITS as usize;

/// Get entry index from bit position
#[inline(always)]
const fn entry_index(bit_idx: usize) -> usize {
    bit_idx / ENTRY_BITS
}

/// Get bit offset within entry from bit position
#[inline(always)]
const fn offset(bit_idx: usize) -> usize {
    bit_idx % ENTRY_BITS
}

/// Convert a signed bit index into a table address.
fn checked_bit_index(bit_idx: i64) -> Result<usize> {
    if bit_idx < 0 {
        return Err(BitArrayError::NegativeIndex(bit_idx));
    }
    usize::try_from(bit_idx).map_err(|_| BitArrayError::IndexTooLarge(bit_idx))
}

/// Dynamically resizable bit array backed by a trimmed table of entries.
///
/// All bit indices are 0-based. Bits beyond the table read as 0. The table
/// is kept in canonical form (no trailing zero entry), which makes the
/// derived equality and hashing agree with bit-wise equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct BitArray {
    /// Storage entries, least significant bit first
    table: Vec<Entry>,
}

impl BitArray {
    /// Create an empty BitArray (every bit reads as 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::BitArray;
    ///
    /// let ba = BitArray::new();
    /// assert_eq!(ba.size(), 0);
    /// assert!(!ba.get(1000));
    /// ```
    pub fn new() -> Self {
        Self { table: Vec::new() }
    }

    /// Create a BitArray from an initial table of entries.
    ///
    /// Trailing zero entries are trimmed immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::BitArray;
    ///
    /// let ba = BitArray::from_entries(vec![1, 2, 3, 0]);
    /// assert_eq!(ba.entries(), &[1, 2, 3]);
    /// ```
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut ba = Self { table: entries };
        ba.trim();
        ba
    }

    /// Maximum number of bits held by a single table entry.
    #[inline]
    pub const fn max_bits_per_entry() -> usize {
        ENTRY_BITS
    }

    // =========================================================================
    // Table Management
    // =========================================================================

    /// Entry holding `bit_idx`, or 0 when it lies past the table.
    #[inline]
    fn get_entry(&self, bit_idx: usize) -> Entry {
        self.table
            .get(entry_index(bit_idx))
            .copied()
            .unwrap_or(0)
    }

    /// Store `entry` at the position holding `bit_idx`, growing the table
    /// with zero entries as needed, then restore canonical form.
    fn set_entry(&mut self, bit_idx: usize, entry: Entry) {
        let idx = entry_index(bit_idx);
        if idx >= self.table.len() {
            if entry == 0 {
                return;
            }
            self.table.resize(idx + 1, 0);
        }
        self.table[idx] = entry;
        self.trim();
    }

    /// Reserve the entries needed to write `bit_idx` without aborting on
    /// allocation failure.
    fn try_reserve_for(&mut self, bit_idx: usize) -> Result<()> {
        let entries = entry_index(bit_idx) + 1;
        if entries <= self.table.len() {
            return Ok(());
        }
        self.table
            .try_reserve(entries - self.table.len())
            .map_err(|_| BitArrayError::CapacityOverflow {
                index: bit_idx,
                entries,
            })
    }

    /// Remove all high-order zero entries.
    fn trim(&mut self) {
        while self.table.last() == Some(&0) {
            self.table.pop();
        }
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Get bit at position `b`. Bits past the table are 0.
    #[inline]
    pub fn get(&self, b: usize) -> bool {
        (self.get_entry(b) >> offset(b)) & 1 != 0
    }

    /// Assign bit at position `b`.
    ///
    /// Setting a bit past the table grows it; clearing one never does.
    ///
    /// # Panics
    ///
    /// Aborts on allocation failure when setting a bit far past the table
    /// (e.g. `usize::MAX`). Use [`BitArray::try_set`] for untrusted indices.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::{BitArray, ENTRY_BITS};
    ///
    /// let mut ba = BitArray::new();
    /// ba.set(ENTRY_BITS * 5 + 1, true);
    /// assert_eq!(ba.size(), 6);
    ///
    /// ba.set(ENTRY_BITS * 9, false);
    /// assert_eq!(ba.size(), 6);
    /// ```
    #[inline]
    pub fn set(&mut self, b: usize, value: bool) {
        let entry = self.get_entry(b);
        let mask: Entry = 1 << offset(b);
        if value {
            self.set_entry(b, entry | mask);
        } else {
            self.set_entry(b, entry & !mask);
        }
    }

    /// Toggle bit at position `b` and return its new value.
    ///
    /// # Panics
    ///
    /// Aborts on allocation failure when toggling a bit far past the table.
    /// Use [`BitArray::try_toggle`] for untrusted indices.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::BitArray;
    ///
    /// let mut ba = BitArray::new();
    /// assert!(ba.toggle(7));
    /// assert!(!ba.toggle(7));
    /// assert_eq!(ba.size(), 0);
    /// ```
    #[inline]
    pub fn toggle(&mut self, b: usize) -> bool {
        let entry = self.get_entry(b);
        let mask: Entry = 1 << offset(b);
        self.set_entry(b, entry ^ mask);
        self.get(b)
    }

    // =========================================================================
    // Checked Operations
    // =========================================================================

    /// Get bit at a signed position.
    ///
    /// Returns `NegativeIndex` for negative positions. Positions beyond the
    /// addressable range read as 0.
    pub fn try_get(&self, b: i64) -> Result<bool> {
        match checked_bit_index(b) {
            Ok(b) => Ok(self.get(b)),
            Err(BitArrayError::IndexTooLarge(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Assign bit at a signed position.
    ///
    /// The index is validated and any growth is reserved before the table is
    /// touched, so on error the array is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::{BitArray, BitArrayError};
    ///
    /// let mut ba = BitArray::new();
    /// assert_eq!(ba.try_set(-1, true), Err(BitArrayError::NegativeIndex(-1)));
    /// assert!(ba.try_set(3, true).is_ok());
    /// assert!(ba.get(3));
    /// ```
    pub fn try_set(&mut self, b: i64, value: bool) -> Result<()> {
        let b = checked_bit_index(b)?;
        if value {
            self.try_reserve_for(b)?;
        }
        self.set(b, value);
        Ok(())
    }

    /// Toggle bit at a signed position and return its new value.
    pub fn try_toggle(&mut self, b: i64) -> Result<bool> {
        let b = checked_bit_index(b)?;
        self.try_reserve_for(b)?;
        Ok(self.toggle(b))
    }

    // =========================================================================
    // Entry-wise Transformations
    // =========================================================================

    /// Map every stored entry through `op` into a new BitArray.
    ///
    /// Only entries present in the table are visited; the zeros past the
    /// table are left alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::BitArray;
    ///
    /// let ba = BitArray::from_entries(vec![0b011, 0b110]);
    /// let shifted = ba.map(|e| e >> 1);
    /// assert_eq!(shifted.entries(), &[0b001, 0b011]);
    /// ```
    pub fn map<F>(&self, op: F) -> BitArray
    where
        F: FnMut(Entry) -> Entry,
    {
        Self::from_entries(self.table.iter().copied().map(op).collect())
    }

    /// Merge with `other` entry-wise under `op` into a new BitArray.
    ///
    /// The shorter table is zero-padded to the length of the longer one, and
    /// `op` receives `(self_entry, other_entry)` pairs. Neither operand is
    /// modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_array::BitArray;
    ///
    /// let a = BitArray::from_entries(vec![1]);
    /// let b = BitArray::from_entries(vec![0, 2, 3]);
    /// assert_eq!(a.merge(&b, u64::max).entries(), &[1, 2, 3]);
    /// ```
    pub fn merge<F>(&self, other: &BitArray, mut op: F) -> BitArray
    where
        F: FnMut(Entry, Entry) -> Entry,
    {
        let table = self
            .table
            .iter()
            .zip_longest(other.table.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(&a, &b) => op(a, b),
                EitherOrBoth::Left(&a) => op(a, 0),
                EitherOrBoth::Right(&b) => op(0, b),
            })
            .collect();
        Self::from_entries(table)
    }

    /// Bitwise NOT of every stored entry.
    ///
    /// The complement covers the table's current extent only: bits past the
    /// table stay 0 in the result.
    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> BitArray {
        self.map(|e| !e)
    }

    /// Bitwise AND with `other`.
    pub fn and(&self, other: &BitArray) -> BitArray {
        self.merge(other, |a, b| a & b)
    }

    /// Bitwise OR with `other`.
    pub fn or(&self, other: &BitArray) -> BitArray {
        self.merge(other, |a, b| a | b)
    }

    /// Bitwise XOR with `other`.
    pub fn xor(&self, other: &BitArray) -> BitArray {
        self.merge(other, |a, b| a ^ b)
    }

    // =========================================================================
    // Vector Operations
    // =========================================================================

    /// Replace the contents with exactly the bits at `idxs`.
    pub fn set_acts(&mut self, idxs: &[usize]) {
        self.clear();
        for &idx in idxs {
            self.set(idx, true);
        }
    }

    /// Get indices of all set bits, in ascending order.
    pub fn get_acts(&self) -> Vec<usize> {
        let mut acts = Vec::with_capacity(self.num_set());
        acts.extend(self.iter_ones());
        acts
    }

    /// Iterate over the indices of set bits, in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.table
            .iter()
            .enumerate()
            .flat_map(|(entry_idx, &entry)| {
                let base = entry_idx * ENTRY_BITS;
                let mut word = entry;
                std::iter::from_fn(move || {
                    if word == 0 {
                        return None;
                    }
                    let bit_idx = word.trailing_zeros() as usize;
                    word &= word - 1;
                    Some(base + bit_idx)
                })
            })
    }

    // =========================================================================
    // Counting Operations
    // =========================================================================

    /// Count number of set bits (population count).
    #[inline]
    pub fn num_set(&self) -> usize {
        self.table.iter().map(|e| e.count_ones() as usize).sum()
    }

    /// Count bits set in both `self` and `other`.
    ///
    /// Arrays of different sizes are compared over the shorter table, since
    /// the longer one's excess overlaps only zeros.
    pub fn num_similar(&self, other: &BitArray) -> usize {
        self.table
            .iter()
            .zip(other.table.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Index of the highest set bit, or `None` if no bit is set.
    pub fn highest_set(&self) -> Option<usize> {
        let last = *self.table.last()?;
        let top = ENTRY_BITS - 1 - last.leading_zeros() as usize;
        Some((self.table.len() - 1) * ENTRY_BITS + top)
    }

    /// Number of bits up to and including the highest set bit.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.highest_set().map_or(0, |b| b + 1)
    }

    // =========================================================================
    // Information and Access
    // =========================================================================

    /// Get number of entries in the table (not the number of bits).
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// True if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Clear every bit, releasing the table.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Get read-only access to the entry table.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.table
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.table.capacity() * std::mem::size_of::<Entry>()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Vec<Entry>> for BitArray {
    fn from(entries: Vec<Entry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<BitArray> for Vec<Entry> {
    fn from(ba: BitArray) -> Self {
        ba.table
    }
}

impl FromIterator<usize> for BitArray {
    /// Build a BitArray with the given bit indices set.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut ba = BitArray::new();
        ba.extend(iter);
        ba
    }
}

impl Extend<usize> for BitArray {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for b in iter {
            self.set(b, true);
        }
    }
}

impl fmt::Display for BitArray {
    /// Format active bit indices as `{a, b, c}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, act) in self.iter_ones().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", act)?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Bitwise Operators
// =============================================================================

impl BitAnd for BitArray {
    type Output = BitArray;

    fn bitand(self, rhs: Self) -> Self::Output {
        &self & &rhs
    }
}

impl BitAnd for &BitArray {
    type Output = BitArray;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for BitArray {
    type Output = BitArray;

    fn bitor(self, rhs: Self) -> Self::Output {
        &self | &rhs
    }
}

impl BitOr for &BitArray {
    type Output = BitArray;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitXor for BitArray {
    type Output = BitArray;

    fn bitxor(self, rhs: Self) -> Self::Output {
        &self ^ &rhs
    }
}

impl BitXor for &BitArray {
    type Output = BitArray;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor(rhs)
    }
}

impl Not for BitArray {
    type Output = BitArray;

    fn not(self) -> Self::Output {
        BitArray::not(&self)
    }
}

impl Not for &BitArray {
    type Output = BitArray;

    fn not(self) -> Self::Output {
        BitArray::not(self)
    }
}

impl BitAndAssign<&BitArray> for BitArray {
    fn bitand_assign(&mut self, rhs: &BitArray) {
        self.table.truncate(rhs.table.len());
        for (a, b) in self.table.iter_mut().zip(rhs.table.iter()) {
            *a &= b;
        }
        self.trim();
    }
}

impl BitOrAssign<&BitArray> for BitArray {
    fn bitor_assign(&mut self, rhs: &BitArray) {
        if rhs.table.len() > self.table.len() {
            self.table.resize(rhs.table.len(), 0);
        }
        for (a, b) in self.table.iter_mut().zip(rhs.table.iter()) {
            *a |= b;
        }
        self.trim();
    }
}

impl BitXorAssign<&BitArray> for BitArray {
    fn bitxor_assign(&mut self, rhs: &BitArray) {
        if rhs.table.len() > self.table.len() {
            self.table.resize(rhs.table.len(), 0);
        }
        for (a, b) in self.table.iter_mut().zip(rhs.table.iter()) {
            *a ^= b;
        }
        self.trim();
    }
}
