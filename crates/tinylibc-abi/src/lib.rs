//! C ABI surface for tinylibc.
//!
//! Every function here is an `extern "C"` entry point with the exact C
//! signature of the routine it stands in for. The entry points only turn raw
//! pointers into slices and hand them to `tinylibc-core`.
//!
//! Symbol export is a build-time decision:
//! - without features the functions are ordinary Rust items, so a test binary
//!   never shadows the host C library;
//! - `fallback-symbols` exports them unmangled under their C names;
//! - `weak-linkage` (nightly) additionally marks them weak, so a definition
//!   supplied by the host wins at link time and these act only as fallbacks.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "weak-linkage", feature(linkage))]
#![no_builtins]

pub mod stdio_abi;
pub mod stdlib_abi;
pub mod string_abi;
