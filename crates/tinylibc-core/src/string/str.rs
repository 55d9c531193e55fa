//! String operations: strlen, strcmp, strncmp, stpcpy, strcpy.
//!
//! These are safe Rust implementations operating on byte slices that represent
//! NUL-terminated C strings. In this safe Rust model, strings are `&[u8]` slices
//! where a NUL byte (`0x00`) marks the logical end of the string. A slice with
//! no NUL behaves as if it were terminated just past its last byte; nothing
//! beyond the slice is ever read.

use super::word::{WORD, has_zero_byte, same_word_offset};

#[inline]
fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. Scans `s` for the first `0x00` byte and returns
/// its index. If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Compares two NUL-terminated byte strings lexicographically.
///
/// Equivalent to C `strcmp`. Bytes compare as unsigned values and the result
/// is the difference of the first pair that differs, or of the pair at which
/// the shorter string terminates. Zero means both strings are identical up to
/// and including their terminators.
pub fn strcmp(s1: &[u8], s2: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let a = byte_at(s1, i);
        let b = byte_at(s2, i);

        if a != b || a == 0 {
            return i32::from(a) - i32::from(b);
        }
        i += 1;
    }
}

/// Compares at most `n` bytes of two NUL-terminated byte strings.
///
/// Equivalent to C `strncmp`. Like [`strcmp`], but stops after `n` bytes.
/// `n == 0` always compares equal. The bound is a ceiling: comparison still
/// stops at the first terminator.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = byte_at(s1, i);
        let b = byte_at(s2, i);

        if a != b || a == 0 {
            return i32::from(a) - i32::from(b);
        }
    }
    0
}

/// Stores `byte` at `dest[i]`, panicking with the `stpcpy` message when the
/// destination has run out.
#[inline]
fn put_byte(dest: &mut [u8], i: usize, byte: u8) {
    let len = dest.len();
    match dest.get_mut(i) {
        Some(slot) => *slot = byte,
        None => panic!("stpcpy: destination buffer too small ({len} bytes)"),
    }
}

/// Copies a NUL-terminated string from `src` into `dest` and returns the
/// index of the trailing NUL byte in `dest`.
///
/// Equivalent to C `stpcpy`; the returned index models the returned pointer.
/// The copy is a single pass over `src`: when `src` and `dest` share the same
/// offset within a machine word the bulk of the string is moved a word at a
/// time, falling back to single bytes for the word holding the terminator.
///
/// # Panics
///
/// Panics if `dest` is too small to hold the source string plus NUL. The
/// bytes that did fit have already been written when that happens.
pub fn stpcpy(dest: &mut [u8], src: &[u8]) -> usize {
    let mut i = 0;
    if same_word_offset(dest.as_ptr(), src.as_ptr()) {
        let misalign = (src.as_ptr() as usize) % WORD;
        let head = if misalign == 0 { 0 } else { WORD - misalign };
        while i < head {
            let byte = byte_at(src, i);
            put_byte(dest, i, byte);
            if byte == 0 {
                return i;
            }
            i += 1;
        }

        while i + WORD <= dest.len() {
            let Some(chunk) = src.get(i..i + WORD) else {
                break;
            };
            let Ok(bytes) = <[u8; WORD]>::try_from(chunk) else {
                break;
            };
            if has_zero_byte(usize::from_ne_bytes(bytes)) {
                break;
            }
            dest[i..i + WORD].copy_from_slice(&bytes);
            i += WORD;
        }
    }

    loop {
        let byte = byte_at(src, i);
        put_byte(dest, i, byte);
        if byte == 0 {
            return i;
        }
        i += 1;
    }
}

/// Copies a NUL-terminated string from `src` into `dest`.
///
/// Equivalent to C `strcpy`. Copies bytes from `src` until (and including)
/// the NUL terminator. Returns the number of bytes copied (including the NUL).
///
/// # Panics
///
/// Panics if `dest` is too small to hold the source string plus NUL.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> usize {
    stpcpy(dest, src) + 1
}
