//! String and memory operations.
//!
//! Implements the `<string.h>` functions tinylibc provides as safe Rust
//! operating on slices.

pub mod mem;
pub mod str;
pub mod word;

// Re-export commonly used functions.
pub use mem::memset;
pub use str::{stpcpy, strcmp, strcpy, strlen, strncmp};
pub use word::{HIGHS, ONES, WORD, has_zero_byte};
