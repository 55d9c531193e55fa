//! Integration tests for `<string.h>` ABI entrypoints.

use std::ffi::{c_char, c_void};

use proptest::prelude::*;
use tinylibc_abi::string_abi::{__stpcpy, memset, stpcpy, strcmp, strcpy, strncmp};
use tinylibc_core::string as core_string;

fn to_c_string(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.retain(|&b| b != 0);
    bytes.push(0);
    bytes
}

#[test]
fn stpcpy_returns_pointer_to_trailing_nul() {
    let src = c"hello".as_ptr();
    let mut dst = [0x7f as c_char; 16];

    // SAFETY: destination is writable and source is a valid C string.
    let end = unsafe { stpcpy(dst.as_mut_ptr(), src) };

    // SAFETY: `end` points inside `dst` by contract of `stpcpy`.
    let offset = unsafe { end.offset_from(dst.as_ptr()) };
    assert_eq!(offset, 5);
    let bytes: Vec<u8> = dst[..7].iter().map(|&b| b as u8).collect();
    assert_eq!(bytes, b"hello\0\x7f");
}

#[test]
fn stpcpy_chains_appends() {
    let mut dst = [0 as c_char; 32];

    // SAFETY: `dst` has room for the concatenation and each source is a C string.
    unsafe {
        let mut end = stpcpy(dst.as_mut_ptr(), c"lost".as_ptr());
        end = stpcpy(end, c"+".as_ptr());
        end = stpcpy(end, c"found".as_ptr());
        assert_eq!(end.offset_from(dst.as_ptr()), 10);
    }

    let bytes: Vec<u8> = dst[..11].iter().map(|&b| b as u8).collect();
    assert_eq!(bytes, b"lost+found\0");
}

#[test]
fn stpcpy_handles_every_relative_alignment() {
    let word = std::mem::size_of::<usize>();
    let text = b"the quick brown fox jumps over the lazy dog, twice over\0";
    let mut src_buf = vec![0u8; text.len() + word];
    let mut dst_buf = vec![0u8; text.len() + 2 * word];

    for src_off in 0..word {
        for dst_off in 0..word {
            src_buf[src_off..src_off + text.len()].copy_from_slice(text);
            dst_buf.fill(0xCC);
            // SAFETY: both buffers are large enough at every offset used here.
            let end = unsafe {
                let dst = dst_buf.as_mut_ptr().add(dst_off).cast::<c_char>();
                let end = stpcpy(dst, src_buf.as_ptr().add(src_off).cast());
                end.offset_from(dst)
            };
            assert_eq!(end as usize, text.len() - 1);
            assert_eq!(&dst_buf[dst_off..dst_off + text.len()], &text[..]);
            assert_eq!(dst_buf[dst_off + text.len()], 0xCC);
        }
    }
}

#[test]
fn dunder_stpcpy_matches_stpcpy() {
    let mut dst = [0 as c_char; 8];

    // SAFETY: destination is writable and source is a valid C string.
    let end = unsafe { __stpcpy(dst.as_mut_ptr(), c"ext4".as_ptr()) };
    // SAFETY: `end` points inside `dst`.
    assert_eq!(unsafe { end.offset_from(dst.as_ptr()) }, 4);
    assert_eq!(dst[4], 0);
}

#[test]
fn strcpy_returns_destination() {
    let mut dst = [0 as c_char; 8];

    // SAFETY: destination is writable and source is a valid C string.
    let ret = unsafe { strcpy(dst.as_mut_ptr(), c"inode".as_ptr()) };
    assert_eq!(ret, dst.as_mut_ptr());
    // SAFETY: both sides are NUL-terminated now.
    assert_eq!(unsafe { strcmp(dst.as_ptr(), c"inode".as_ptr()) }, 0);
}

#[test]
fn strcmp_orders_unsigned_bytes() {
    let high = [0xC3_u8, 0];
    // SAFETY: both arguments are NUL-terminated.
    let result = unsafe { strcmp(high.as_ptr().cast(), c"a".as_ptr()) };
    assert_eq!(result, 0xC3 - i32::from(b'a'));
}

#[test]
fn strcmp_is_antisymmetric_and_zero_on_equal() {
    let cases = [
        (c"", c""),
        (c"a", c""),
        (c"abc", c"abd"),
        (c"journal", c"journaling"),
        (c"same", c"same"),
    ];
    for (a, b) in cases {
        // SAFETY: static C strings.
        let (ab, ba) = unsafe { (strcmp(a.as_ptr(), b.as_ptr()), strcmp(b.as_ptr(), a.as_ptr())) };
        assert_eq!(ab.signum(), -ba.signum(), "{a:?} vs {b:?}");
        assert_eq!(ab == 0, a == b, "{a:?} vs {b:?}");
    }
}

#[test]
fn strncmp_returns_zero_for_n_zero() {
    // SAFETY: `n == 0` must not read either pointer, so dangling is fine.
    let result = unsafe {
        strncmp(
            std::ptr::dangling::<c_char>(),
            std::ptr::dangling::<c_char>(),
            0,
        )
    };
    assert_eq!(result, 0);
}

#[test]
fn strncmp_obeys_count_limit() {
    // SAFETY: both pointers refer to static NUL-terminated byte strings.
    let (first, second) = unsafe {
        (
            strncmp(c"abc".as_ptr(), c"abd".as_ptr(), 2),
            strncmp(c"abc".as_ptr(), c"abd".as_ptr(), 3),
        )
    };

    assert_eq!(first, 0);
    assert!(second < 0);
}

#[test]
fn strncmp_stops_after_nul_terminator() {
    let lhs_buf = [b'a', b'b', 0, b'c', b'd', 0];
    let rhs_buf = [b'a', b'b', 0, b'e', b'f', 0];

    // SAFETY: both buffers are NUL-terminated well before the bound matters.
    let result = unsafe { strncmp(lhs_buf.as_ptr().cast(), rhs_buf.as_ptr().cast(), usize::MAX) };
    assert_eq!(result, 0);
}

#[test]
fn strncmp_reads_no_further_than_bound_without_terminator() {
    let lhs_buf = *b"abcX";
    let rhs_buf = *b"abcY";

    // SAFETY: only the first 3 bytes of each array may be read.
    let result = unsafe { strncmp(lhs_buf.as_ptr().cast(), rhs_buf.as_ptr().cast(), 3) };
    assert_eq!(result, 0);
}

#[test]
fn memset_fills_and_returns_destination() {
    let mut buf = [0u8; 8];

    // SAFETY: `buf` is writable for 5 bytes.
    let ret = unsafe { memset(buf.as_mut_ptr().cast(), 7, 5) };
    assert_eq!(ret, buf.as_mut_ptr().cast::<c_void>());
    assert_eq!(buf, [7, 7, 7, 7, 7, 0, 0, 0]);
}

#[test]
fn memset_zero_length_touches_nothing() {
    let dangling = std::ptr::dangling_mut::<c_void>();

    // SAFETY: `n == 0` performs no writes.
    let ret = unsafe { memset(dangling, 0xFF, 0) };
    assert_eq!(ret, dangling);
}

#[test]
fn strcmp_reads_one_byte_on_first_mismatch() {
    // Neither array is terminated: only the differing first bytes may be read.
    let lhs = [b'a' as c_char];
    let rhs = [b'/' as c_char];

    // SAFETY: the first bytes differ, so the comparison reads nothing else.
    let result = unsafe { strcmp(lhs.as_ptr(), rhs.as_ptr()) };
    assert_eq!(result, i32::from(b'a') - i32::from(b'/'));
}

proptest! {
    #[test]
    fn prop_stpcpy_at_any_offsets_returns_end_and_copies_exactly(
        data in proptest::collection::vec(any::<u8>(), 0..160),
        src_off in 0usize..16,
        dst_off in 0usize..16
    ) {
        let text = to_c_string(data);
        let mut src_buf = vec![0xEEu8; text.len() + 16];
        src_buf[src_off..src_off + text.len()].copy_from_slice(&text);
        let mut dst_buf = vec![0xCCu8; text.len() + 32];

        // SAFETY: `src_buf` holds a terminated copy of `text` at `src_off`, and
        // `dst_buf` has room for it at `dst_off`.
        let end = unsafe {
            let dst = dst_buf.as_mut_ptr().add(dst_off).cast::<c_char>();
            let end = stpcpy(dst, src_buf.as_ptr().add(src_off).cast::<c_char>());
            end.offset_from(dst)
        };

        prop_assert_eq!(end as usize, text.len() - 1);
        prop_assert_eq!(&dst_buf[dst_off..dst_off + text.len()], &text[..]);
        prop_assert!(dst_buf[..dst_off].iter().all(|&b| b == 0xCC));
        prop_assert!(dst_buf[dst_off + text.len()..].iter().all(|&b| b == 0xCC));
    }

    #[test]
    fn prop_strcmp_matches_core(
        left in proptest::collection::vec(any::<u8>(), 0..96),
        right in proptest::collection::vec(any::<u8>(), 0..96)
    ) {
        let (left, right) = (to_c_string(left), to_c_string(right));
        // SAFETY: both inputs are NUL-terminated.
        let abi = unsafe { strcmp(left.as_ptr().cast(), right.as_ptr().cast()) };
        prop_assert_eq!(abi, core_string::strcmp(&left, &right));
    }

    #[test]
    fn prop_strncmp_matches_core(
        left in proptest::collection::vec(any::<u8>(), 0..64),
        right in proptest::collection::vec(any::<u8>(), 0..64),
        n in 0usize..96
    ) {
        let (left, right) = (to_c_string(left), to_c_string(right));
        // SAFETY: both inputs are NUL-terminated, which bounds every read.
        let abi = unsafe { strncmp(left.as_ptr().cast(), right.as_ptr().cast(), n) };
        prop_assert_eq!(abi, core_string::strncmp(&left, &right, n));
    }
}
