//! Safe Rust implementations of the tinylibc primitives.
//!
//! Everything here operates on length-carrying slices. The raw-pointer,
//! C-ABI surface lives in `tinylibc-abi` and delegates to this crate wherever
//! the length of the region is known up front.

#![cfg_attr(not(test), no_std)]
#![no_builtins]

pub mod stdlib;
pub mod string;
