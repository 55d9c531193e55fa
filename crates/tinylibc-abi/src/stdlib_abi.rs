//! ABI layer for the `<stdlib.h>` sort entry points, `qsort` and `qsort_r`.
//!
//! The only checked precondition in tinylibc lives here: the element count
//! times the element width must fit in `usize`. A violation aborts the
//! process; there is no error return to report it through.

use core::ffi::{c_int, c_void};
use core::slice;

use tinylibc_core::stdlib::sort::{self, SortError, SortExtent};

/// Comparator accepted by `qsort`.
pub type Comparator = unsafe extern "C" fn(*const c_void, *const c_void) -> c_int;

/// Comparator accepted by `qsort_r`; the third argument is the caller's context.
pub type ContextComparator =
    unsafe extern "C" fn(*const c_void, *const c_void, *mut c_void) -> c_int;

/// Terminates on a violated sort precondition.
///
/// Called from inside `extern "C"` functions, which cannot unwind, so the
/// panic aborts the process under every panic strategy.
#[cold]
#[inline(never)]
fn precondition_failed(err: SortError) -> ! {
    panic!("qsort: {err}")
}

/// Checks the array shape and views it as bytes.
///
/// Returns `None` when there is nothing to reorder.
///
/// # Safety
///
/// `base` must be valid for reads and writes of `nel * width` bytes.
unsafe fn sort_region<'a>(base: *mut c_void, nel: usize, width: usize) -> Option<&'a mut [u8]> {
    let extent = match SortExtent::new(nel, width) {
        Ok(extent) => extent,
        Err(err) => precondition_failed(err),
    };
    if !extent.needs_sorting() || base.is_null() {
        return None;
    }
    // SAFETY: the extent is representable and the caller owns that many bytes.
    Some(unsafe { slice::from_raw_parts_mut(base.cast::<u8>(), extent.byte_len()) })
}

/// C `qsort_r` (GNU argument order): sort `nel` elements of `width` bytes in
/// place, passing `context` to every comparator call.
///
/// # Safety
///
/// `base` must be valid for `nel * width` bytes and `compar` must be safe to
/// call on any two elements of the array together with `context`.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn qsort_r(
    base: *mut c_void,
    nel: usize,
    width: usize,
    compar: Option<ContextComparator>,
    context: *mut c_void,
) {
    // SAFETY: forwarded caller contract.
    let Some(array) = (unsafe { sort_region(base, nel, width) }) else {
        return;
    };
    let Some(compar) = compar else {
        return;
    };

    let mut context = context;
    sort::qsort_r(array, width, &mut context, |a, b, ctx| {
        // SAFETY: `a` and `b` are whole elements of the caller's array.
        unsafe { compar(a.as_ptr().cast(), b.as_ptr().cast(), *ctx) }
    });
}

/// C `qsort`: sort `nel` elements of `width` bytes in place.
///
/// # Safety
///
/// `base` must be valid for `nel * width` bytes and `compar` must be safe to
/// call on any two elements of the array.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn qsort(
    base: *mut c_void,
    nel: usize,
    width: usize,
    compar: Option<Comparator>,
) {
    // SAFETY: forwarded caller contract.
    let Some(array) = (unsafe { sort_region(base, nel, width) }) else {
        return;
    };
    let Some(compar) = compar else {
        return;
    };

    sort::qsort(array, width, |a, b| {
        // SAFETY: `a` and `b` are whole elements of the caller's array.
        unsafe { compar(a.as_ptr().cast(), b.as_ptr().cast()) }
    });
}
