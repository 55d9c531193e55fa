//! Word-at-a-time helpers for scanning NUL-terminated data.

/// Size of a machine word in bytes.
pub const WORD: usize = core::mem::size_of::<usize>();

/// A word with the value `0x01` in every byte.
pub const ONES: usize = usize::MAX / u8::MAX as usize;

/// A word with the high bit set in every byte.
pub const HIGHS: usize = ONES * (u8::MAX as usize / 2 + 1);

/// Returns `true` if any byte of `word` is zero.
///
/// Subtracting `ONES` borrows into the high bit of every byte that was zero;
/// masking with `!word` discards bytes whose high bit was already set.
#[inline(always)]
#[must_use]
pub const fn has_zero_byte(word: usize) -> bool {
    (word.wrapping_sub(ONES) & !word & HIGHS) != 0
}

/// Returns `true` if `a` and `b` sit at the same offset within a word.
#[inline]
#[must_use]
pub fn same_word_offset(a: *const u8, b: *const u8) -> bool {
    (a as usize) % WORD == (b as usize) % WORD
}
