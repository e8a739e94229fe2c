//! Error types for bit array operations.
//!
//! The core `BitArray` API takes `usize` bit indices and aborts if growing the
//! table cannot be allocated. The checked entry points (`try_get`, `try_set`,
//! `try_toggle`) accept signed indices, reserve growth up front, and report
//! failures through the `BitArrayError` type defined here. Use them for
//! untrusted or very large indices.

use thiserror::Error;

/// The error type for checked bit array operations.
///
/// Every checked operation validates its input before touching the table, so
/// a returned error guarantees the array was not modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitArrayError {
    /// A negative bit index was supplied
    #[error("Invalid bit index: {0} is negative")]
    NegativeIndex(i64),

    /// A bit index does not fit the platform's address width
    ///
    /// Only raised where `usize` is narrower than `i64` (e.g. 32-bit targets).
    #[error("Invalid bit index: {0} exceeds the addressable range")]
    IndexTooLarge(i64),

    /// Growing the table to reach the bit index failed to allocate
    #[error("Capacity overflow: bit index {index} needs {entries} entries")]
    CapacityOverflow {
        /// The bit index that was written
        index: usize,
        /// Number of entries the table would need to hold it
        entries: usize,
    },
}

/// A specialized `Result` type for checked bit array operations.
pub type Result<T> = std::result::Result<T, BitArrayError>;
