//! In-place comparator sort over arrays of opaque fixed-width elements.
//!
//! The algorithm is a Shell sort with the `3g + 1` gap sequence. It needs no
//! memory beyond a handful of scalars, is not stable, and makes no
//! O(n log n) worst-case promise.

use core::fmt;

/// Errors detected before any ordering work begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortError {
    /// `nel * width` does not fit in `usize`.
    ExtentOverflow { nel: usize, width: usize },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtentOverflow { nel, width } => write!(
                f,
                "sort extent overflows usize: {nel} elements of {width} bytes"
            ),
        }
    }
}

impl core::error::Error for SortError {}

/// Shape of a caller-supplied array: element count and element width.
///
/// Construction checks that the total byte length is representable, so the
/// byte arithmetic done while sorting can never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortExtent {
    nel: usize,
    width: usize,
}

impl SortExtent {
    /// Validates `nel` elements of `width` bytes.
    ///
    /// Arrays that need no ordering work (`nel <= 1` or `width == 0`) are
    /// always accepted.
    pub fn new(nel: usize, width: usize) -> Result<Self, SortError> {
        if nel > 1 && width > 0 && nel > usize::MAX / width {
            return Err(SortError::ExtentOverflow { nel, width });
        }
        Ok(Self { nel, width })
    }

    #[must_use]
    pub const fn nel(&self) -> usize {
        self.nel
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Total size of the array in bytes.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.nel * self.width
    }

    /// Returns `true` when sorting could reorder anything.
    #[must_use]
    pub const fn needs_sorting(&self) -> bool {
        self.nel > 1 && self.width > 0
    }
}

/// Sorts `base`, viewed as consecutive elements of `width` bytes, threading
/// `context` through every comparator call.
///
/// Equivalent to C `qsort_r`. `compare(a, b, context)` returns a negative,
/// zero or positive value like `strcmp`. Trailing bytes that do not form a
/// whole element are left untouched.
pub fn qsort_r<C, F>(base: &mut [u8], width: usize, context: &mut C, mut compare: F)
where
    C: ?Sized,
    F: FnMut(&[u8], &[u8], &mut C) -> i32,
{
    if width == 0 {
        return;
    }
    let nel = base.len() / width;
    if nel < 2 {
        return;
    }

    let mut gap = 0usize;
    loop {
        gap = 3 * gap + 1;
        if gap >= (nel - 1) / 3 {
            break;
        }
    }
    // gap < nel here, so neither product can exceed base.len().
    let mut wgap = gap * width;
    let wnel = nel * width;

    loop {
        let mut i = wgap;
        loop {
            let mut j = i;
            loop {
                j -= wgap;
                let a = j;
                let b = j + wgap;
                let order = {
                    let (head, tail) = base.split_at(b);
                    compare(&head[a..a + width], &tail[..width], context)
                };
                if order <= 0 {
                    break;
                }
                swap_bytes(base, a, b, width);
                if j < wgap {
                    break;
                }
            }
            i += width;
            if i >= wnel {
                break;
            }
        }
        wgap = (wgap - width) / 3;
        if wgap == 0 {
            break;
        }
    }
}

/// Sorts `base` without a context argument.
///
/// Equivalent to C `qsort`; delegates to [`qsort_r`].
pub fn qsort<F>(base: &mut [u8], width: usize, mut compare: F)
where
    F: FnMut(&[u8], &[u8]) -> i32,
{
    qsort_r(base, width, &mut (), |a, b, _| compare(a, b));
}

/// Exchanges the `width`-byte elements at offsets `a < b`, one byte at a time.
fn swap_bytes(base: &mut [u8], a: usize, b: usize, width: usize) {
    for k in 0..width {
        base.swap(a + k, b + k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cmp_u32(a: &[u8], b: &[u8]) -> i32 {
        let x = u32::from_ne_bytes([a[0], a[1], a[2], a[3]]);
        let y = u32::from_ne_bytes([b[0], b[1], b[2], b[3]]);
        x.cmp(&y) as i32
    }

    fn to_bytes(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    fn from_bytes(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn extent_accepts_trivial_shapes() {
        assert!(SortExtent::new(0, usize::MAX).is_ok());
        assert!(SortExtent::new(1, usize::MAX).is_ok());
        assert!(SortExtent::new(usize::MAX, 0).is_ok());
        assert!(!SortExtent::new(usize::MAX, 0).unwrap().needs_sorting());
    }

    #[test]
    fn extent_rejects_overflowing_product() {
        let err = SortExtent::new(usize::MAX / 2 + 1, 2).unwrap_err();
        assert_eq!(
            err,
            SortError::ExtentOverflow {
                nel: usize::MAX / 2 + 1,
                width: 2
            }
        );
    }

    #[test]
    fn extent_accepts_exact_fit() {
        let extent = SortExtent::new(usize::MAX / 4, 4).unwrap();
        assert_eq!(extent.byte_len(), (usize::MAX / 4) * 4);
        assert!(extent.needs_sorting());
    }

    #[test]
    fn extent_error_display_names_shape() {
        let err = SortExtent::new(usize::MAX, 3).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("3 bytes"), "{text}");
    }

    #[test]
    fn sorts_small_integer_array() {
        let mut data = to_bytes(&[5, 3, 4, 1, 2]);
        qsort(&mut data, 4, cmp_u32);
        assert_eq!(from_bytes(&data), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorted_input_is_left_unchanged() {
        let values: Vec<u32> = (0..50).collect();
        let mut data = to_bytes(&values);
        qsort(&mut data, 4, cmp_u32);
        assert_eq!(from_bytes(&data), values);
    }

    #[test]
    fn reverse_input_with_duplicates() {
        let values: Vec<u32> = (0..200).rev().map(|v| v / 3).collect();
        let mut expected = values.clone();
        expected.sort_unstable();
        let mut data = to_bytes(&values);
        qsort(&mut data, 4, cmp_u32);
        assert_eq!(from_bytes(&data), expected);
    }

    #[test]
    fn zero_width_and_single_element_are_noops() {
        let mut data = vec![3u8, 1, 2];
        qsort(&mut data, 0, |_, _| panic!("comparator must not run"));
        qsort(&mut data, 3, |_, _| panic!("comparator must not run"));
        assert_eq!(data, vec![3, 1, 2]);
    }

    #[test]
    fn trailing_partial_element_is_untouched() {
        let mut data = vec![9u8, 8, 7, 6, 5];
        qsort(&mut data, 2, |a, b| i32::from(a[0]) - i32::from(b[0]));
        assert_eq!(data, vec![7, 6, 9, 8, 5]);
    }

    #[test]
    fn context_is_threaded_through_every_call() {
        let mut data = to_bytes(&[4, 2, 9, 1, 7, 3]);
        let mut calls = 0usize;
        qsort_r(&mut data, 4, &mut calls, |a, b, calls| {
            *calls += 1;
            cmp_u32(a, b)
        });
        assert!(calls > 0);
        assert_eq!(from_bytes(&data), vec![1, 2, 3, 4, 7, 9]);
    }

    #[test]
    fn descending_comparator_via_context() {
        let mut data = to_bytes(&[1, 5, 2, 4, 3]);
        let mut descending = true;
        qsort_r(&mut data, 4, &mut descending, |a, b, desc| {
            let order = cmp_u32(a, b);
            if *desc { -order } else { order }
        });
        assert_eq!(from_bytes(&data), vec![5, 4, 3, 2, 1]);
    }

    proptest! {
        #[test]
        fn prop_sort_matches_std_sort(values in proptest::collection::vec(any::<u32>(), 0..300)) {
            let mut expected = values.clone();
            expected.sort_unstable();
            let mut data = to_bytes(&values);
            qsort(&mut data, 4, cmp_u32);
            prop_assert_eq!(from_bytes(&data), expected);
        }

        #[test]
        fn prop_wide_records_sort_by_key_and_keep_payload(
            keys in proptest::collection::vec(0u8..16, 0..120)
        ) {
            // 7-byte records: key byte followed by a payload derived from it.
            let mut data: Vec<u8> = keys
                .iter()
                .flat_map(|&k| [k, k ^ 0xA5, k, k, k.wrapping_mul(3), 0xEE, k])
                .collect();
            qsort(&mut data, 7, |a, b| i32::from(a[0]) - i32::from(b[0]));
            let mut expected = keys.clone();
            expected.sort_unstable();
            for (record, key) in data.chunks_exact(7).zip(expected) {
                prop_assert_eq!(record, &[key, key ^ 0xA5, key, key, key.wrapping_mul(3), 0xEE, key][..]);
            }
        }
    }
}
