//! Bit Array - Dynamically Resizable Uncompressed Bit Array
//!
//! A bit array addressable by individual bit index, with lazy growth on write
//! and automatic shrinking after every write. Bits are packed into a table of
//! 64-bit entries; every bit past the end of the table reads as 0.
//!
//! # Key Characteristics
//!
//! - Storage proportional to the highest set bit, never larger
//! - Canonical form: the table never ends in a zero entry
//! - Set algebra (AND, OR, XOR, NOT) across arrays of any size
//! - Entry-wise `map` and `merge` with caller-supplied operations
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use bit_array::BitArray;
//!
//! let mut ba = BitArray::new();
//! ba.set(10, true);
//! ba.set(20, true);
//! assert!(ba.toggle(30));
//!
//! assert_eq!(ba.num_set(), 3);
//! assert_eq!(ba.get_acts(), vec![10, 20, 30]);
//! ```
//!
//! ## Bitwise Operations
//!
//! ```
//! use bit_array::BitArray;
//!
//! let a = BitArray::from_entries(vec![0b101, 0b111]);
//! let b = BitArray::from_entries(vec![0b100, 0b000]);
//!
//! // The zero high entry of the result is trimmed away
//! assert_eq!(a.and(&b).entries(), &[0b100]);
//! assert_eq!((&a | &b).entries(), &[0b101, 0b111]);
//! assert!(a.xor(&a).is_empty());
//! ```
//!
//! # Error Handling
//!
//! The core API takes `usize` indices; `set` and `toggle` abort the process if
//! growing the table to a huge index cannot be allocated. Callers holding
//! signed, untrusted or very large indices use `try_get`, `try_set` and
//! `try_toggle`, which reject negative indices and report allocation failure
//! with [`BitArrayError`] before touching the table.

pub mod bitarray;
pub mod error;

pub use bitarray::{BitArray, Entry, ENTRY_BITS};
pub use error::{BitArrayError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "BitArray";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
