//! Inert `<stdio.h>` stand-ins.
//!
//! Stream I/O is not supported. These exist only so objects that mention
//! `stdout` or `fflush` still link.

use core::ffi::{c_int, c_void};
use core::ptr;

/// A `FILE *` that never points at a stream.
#[repr(transparent)]
#[derive(Debug)]
pub struct StreamHandle(*mut c_void);

// SAFETY: the handle is always null and is never dereferenced.
unsafe impl Sync for StreamHandle {}

impl StreamHandle {
    #[must_use]
    pub const fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Global `stdout`, always null.
#[allow(non_upper_case_globals)]
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub static stdout: StreamHandle = StreamHandle(ptr::null_mut());

/// C `fflush`: accepts any stream, flushes nothing, returns 0.
///
/// # Safety
///
/// Never dereferences `stream`; marked unsafe only to match the C prototype.
#[cfg_attr(feature = "fallback-symbols", unsafe(no_mangle))]
#[cfg_attr(feature = "weak-linkage", linkage = "weak")]
pub unsafe extern "C" fn fflush(_stream: *mut c_void) -> c_int {
    0
}
