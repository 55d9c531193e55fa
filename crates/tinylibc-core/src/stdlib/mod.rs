//! `<stdlib.h>` subset: the in-place comparator sort.

pub mod sort;

pub use sort::{SortError, SortExtent, qsort, qsort_r};
