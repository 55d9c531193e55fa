//! ABI layer for `<string.h>` functions.
//!
//! The copy and fill entry points measure their input (or take the caller's
//! length), rebuild it as a slice covering exactly the bytes the call may
//! touch, and delegate to `tinylibc-core`. The comparisons walk both pointers
//! in a single fused loop, so a mismatch in the first byte reads one byte of
//! each string.
//!
//! Passing a pointer that is not NUL-terminated, or a destination that is too
//! small, is undefined behaviour exactly as in C; nothing is checked.

use core::ffi::{c_char, c_int, c_void};
use core::slice;

use tinylibc_core::string as core_string;

/// Length of a C string, not counting its NUL.
///
/// # Safety
///
/// `ptr` must point to a valid NUL-terminated string.
unsafe fn scan_c_string(ptr: *const c_char) -> usize {
    let mut i = 0usize;
    // SAFETY: caller guarantees a terminator at or after `ptr`.
    while unsafe { *ptr.add(i) } != 0 {
        i += 1;
    }
    i
}

/// View a C string as a slice that includes its terminator.
///
/// # Safety
///
/// Same contract as [`scan_c_string`]; the returned slice must not outlive the
/// caller's string.
unsafe fn c_string_slice<'a>(ptr: *const c_char) -> &'a [u8] {
    // SAFETY: forwarded caller contract.
    let len = unsafe { scan_c_string(ptr) };
    // SAFETY: the scan above read every one of these `len + 1` bytes.
    unsafe { slice::from_raw_parts(ptr.cast::<u8>(), len + 1) }
}

/// Compares two C strings as unsigned bytes in one pass, stopping at the
/// first difference, the first shared terminator, or after `limit` bytes.
///
/// # Safety
///
/// Both pointers must be readable up to their NUL or `limit` bytes, whichever
/// comes first.
unsafe fn compare_c_strings(s1: *const c_char, s2: *const c_char, limit: usize) -> c_int {
    for i in 0..limit {
        // SAFETY: no earlier byte was a terminator and `i < limit`.
        let (a, b) = unsafe { (*s1.add(i) as u8, *s2.add(i) as u8) };
        if a != b || a == 0 {
            return c_int::from(a) - c_int::from(b);
        }
    }
    0
}

/// POSIX `stpcpy`: copy `src` (with its NUL) into `dst` and return a pointer
/// to the copied NUL, so further appends can continue from there.
///
/// # Safety
///
/// `src` must be NUL-terminated, `dst` must have room for the string plus its
/// NUL, and the two regions must not overlap.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn stpcpy(dst: *mut c_char, src: *const c_char) -> *mut c_char {
    // SAFETY: caller guarantees `src` is NUL-terminated.
    let src_bytes = unsafe { c_string_slice(src) };
    // SAFETY: caller guarantees `dst` holds `src_bytes.len()` bytes and does
    // not overlap `src`.
    let dst_bytes = unsafe { slice::from_raw_parts_mut(dst.cast::<u8>(), src_bytes.len()) };
    let end = core_string::stpcpy(dst_bytes, src_bytes);
    // SAFETY: `end` indexes the copied NUL inside `dst`.
    unsafe { dst.add(end) }
}

/// Reserved-name alias of [`stpcpy`], referenced by code built against libc
/// internals.
///
/// # Safety
///
/// Same as [`stpcpy`].
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn __stpcpy(dst: *mut c_char, src: *const c_char) -> *mut c_char {
    // SAFETY: forwarded caller contract.
    unsafe { stpcpy(dst, src) }
}

/// POSIX `strcpy`: like [`stpcpy`] but returns `dst`.
///
/// # Safety
///
/// Same as [`stpcpy`].
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn strcpy(dst: *mut c_char, src: *const c_char) -> *mut c_char {
    // SAFETY: forwarded caller contract.
    unsafe { stpcpy(dst, src) };
    dst
}

/// POSIX `strcmp`: compare two strings as unsigned bytes.
///
/// # Safety
///
/// Both `s1` and `s2` must point to valid NUL-terminated strings.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn strcmp(s1: *const c_char, s2: *const c_char) -> c_int {
    // SAFETY: caller guarantees both strings are NUL-terminated, and the
    // comparison stops at the first terminator.
    unsafe { compare_c_strings(s1, s2, usize::MAX) }
}

/// POSIX `strncmp`: compare at most `n` bytes of two strings.
///
/// `n == 0` returns 0 without reading either pointer. Neither string is read
/// past its terminator, however large `n` is.
///
/// # Safety
///
/// Both pointers must be readable up to their NUL or `n` bytes, whichever
/// comes first.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn strncmp(s1: *const c_char, s2: *const c_char, n: usize) -> c_int {
    // SAFETY: caller guarantees readability up to the NUL or `n` bytes.
    unsafe { compare_c_strings(s1, s2, n) }
}

/// C `memset`: write `c as u8` into `n` bytes at `dst` and return `dst`.
///
/// # Safety
///
/// Caller must ensure `dst` is valid for `n` bytes.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn memset(dst: *mut c_void, c: c_int, n: usize) -> *mut c_void {
    if n == 0 {
        return dst;
    }
    // SAFETY: caller guarantees `dst` is writable for `n` bytes.
    let region = unsafe { slice::from_raw_parts_mut(dst.cast::<u8>(), n) };
    core_string::memset(region, c as u8, n);
    dst
}
