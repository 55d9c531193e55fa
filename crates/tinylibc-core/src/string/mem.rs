//! Memory operations: memset.
//!
//! Safe Rust implementation operating on byte slices, corresponding to the
//! `<string.h>` fill routine.

/// Fills the first `n` bytes of `dest` with the byte `value`.
///
/// Equivalent to C `memset(dest, c, n)`. Only fills `min(n, dest.len())`
/// bytes; `n == 0` writes nothing.
///
/// Returns the number of bytes actually set.
pub fn memset(dest: &mut [u8], value: u8, n: usize) -> usize {
    let count = n.min(dest.len());
    // Plain byte loop: `slice::fill` lowers to a `memset` call, which is this
    // function when exported.
    for byte in &mut dest[..count] {
        *byte = value;
    }
    count
}
