//! Capture host C library behaviour as fixture files.
//!
//! A fixed corpus of inputs is run through the host's `libc` routines and the
//! observed results are recorded in the same canonical form the runner
//! produces, so a captured set can be replayed against tinylibc directly.

use std::ffi::{c_int, c_void};

use serde_json::{Value, json};

use crate::fixtures::FixtureSet;

/// Families understood by [`capture_family`].
pub const FAMILIES: [&str; 2] = ["string", "sort"];

const STRING_CORPUS: [&str; 6] = [
    "",
    "a",
    "lost+found",
    "journal",
    "journaling",
    "the superblock lives at byte offset 1024 on every ext4 volume",
];

/// Capture one family, or every family for `"all"`.
pub fn capture_family(family: &str) -> Result<Vec<FixtureSet>, String> {
    match family {
        "string" => Ok(vec![capture_string()]),
        "sort" => Ok(vec![capture_sort()]),
        "all" => Ok(vec![capture_string(), capture_sort()]),
        other => Err(format!(
            "unknown family '{other}', expected one of {FAMILIES:?} or all"
        )),
    }
}

fn c_string(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

fn host_strcpy(src: &str, dst_len: usize, fill: u8) -> (usize, bool, Vec<u8>) {
    let src = c_string(src);
    let mut dst = vec![fill; dst_len];
    // SAFETY: `src` is NUL-terminated and `dst_len >= src.len()` for every
    // corpus entry.
    unsafe {
        let base = dst.as_mut_ptr().cast();
        let ret = libc::strcpy(base, src.as_ptr().cast());
        let end = libc::strlen(base);
        (end, ret == base, dst)
    }
}

fn host_sign(result: c_int) -> Value {
    json!(result.signum())
}

fn capture_string() -> FixtureSet {
    let mut set = FixtureSet::new("string", "host-libc");

    for (idx, text) in STRING_CORPUS.iter().enumerate() {
        let dst_len = text.len() + 1 + idx % 3;
        let fill = 0xA5;
        let (end, returns_dst, dst) = host_strcpy(text, dst_len, fill);
        let inputs = json!({ "src": text, "dst_len": dst_len, "fill": fill });
        set.push(
            format!("stpcpy_corpus_{idx}"),
            "stpcpy",
            "POSIX.1-2008 stpcpy",
            inputs.clone(),
            &json!({ "end": end, "dst": dst }),
        );
        set.push(
            format!("dunder_stpcpy_corpus_{idx}"),
            "__stpcpy",
            "POSIX.1-2008 stpcpy",
            inputs.clone(),
            &json!({ "end": end, "dst": dst }),
        );
        set.push(
            format!("strcpy_corpus_{idx}"),
            "strcpy",
            "ISO C 7.24.2.3",
            inputs,
            &json!({ "returns_dst": returns_dst, "dst": dst }),
        );
    }

    for (i, a) in STRING_CORPUS.iter().enumerate() {
        for (j, b) in STRING_CORPUS.iter().enumerate() {
            let (ca, cb) = (c_string(a), c_string(b));
            // SAFETY: both inputs are NUL-terminated.
            let cmp = unsafe { libc::strcmp(ca.as_ptr().cast(), cb.as_ptr().cast()) };
            set.push(
                format!("strcmp_{i}_{j}"),
                "strcmp",
                "ISO C 7.24.4.2",
                json!({ "a": a, "b": b }),
                &host_sign(cmp),
            );

            for n in [0usize, 1, 4, 7, 64] {
                // SAFETY: both inputs are NUL-terminated, which bounds every read.
                let cmp = unsafe { libc::strncmp(ca.as_ptr().cast(), cb.as_ptr().cast(), n) };
                set.push(
                    format!("strncmp_{i}_{j}_{n}"),
                    "strncmp",
                    "ISO C 7.24.4.4",
                    json!({ "a": a, "b": b, "n": n }),
                    &host_sign(cmp),
                );
            }
        }
    }

    let high_bytes: [(&[u8], &[u8]); 3] = [
        (&[0xff], &[0x01]),
        (&[0x80, 0x41], &[0x7f]),
        (&[0x61, 0xe9], &[0x61, 0x65]),
    ];
    for (idx, (a, b)) in high_bytes.iter().enumerate() {
        let (mut ca, mut cb) = (a.to_vec(), b.to_vec());
        ca.push(0);
        cb.push(0);
        // SAFETY: both inputs are NUL-terminated.
        let cmp = unsafe { libc::strcmp(ca.as_ptr().cast(), cb.as_ptr().cast()) };
        set.push(
            format!("strcmp_unsigned_{idx}"),
            "strcmp",
            "ISO C 7.24.4.2",
            json!({ "a": a, "b": b }),
            &host_sign(cmp),
        );
    }

    let fills = [(8usize, 7i64, 5usize), (4, 0x141, 4), (16, -1, 16), (3, 9, 0)];
    for (idx, (dst_len, value, n)) in fills.into_iter().enumerate() {
        let mut dst = vec![0x11u8; dst_len];
        let base = dst.as_mut_ptr().cast::<c_void>();
        // SAFETY: `n <= dst_len` for every corpus entry.
        let ret = unsafe { libc::memset(base, value as c_int, n) };
        set.push(
            format!("memset_{idx}"),
            "memset",
            "ISO C 7.24.6.1",
            json!({ "dst_len": dst_len, "value": value, "n": n, "fill": 0x11 }),
            &json!({ "returns_dst": ret == base, "dst": dst }),
        );
    }

    set
}

extern "C" fn ascending(a: *const c_void, b: *const c_void) -> c_int {
    // SAFETY: only used on `i32` arrays.
    let (a, b) = unsafe { (*a.cast::<i32>(), *b.cast::<i32>()) };
    a.cmp(&b) as c_int
}

extern "C" fn descending(a: *const c_void, b: *const c_void) -> c_int {
    -ascending(a, b)
}

fn host_qsort(values: &[i32], reverse: bool) -> Vec<i32> {
    let mut sorted = values.to_vec();
    let compar: unsafe extern "C" fn(*const c_void, *const c_void) -> c_int =
        if reverse { descending } else { ascending };
    // SAFETY: `sorted` is a valid `i32` array of the given length.
    unsafe {
        libc::qsort(
            sorted.as_mut_ptr().cast(),
            sorted.len(),
            size_of::<i32>(),
            Some(compar),
        );
    }
    sorted
}

fn sort_corpus() -> Vec<(&'static str, Vec<i32>)> {
    let mut state = 0x9E37_79B9_u32;
    let scrambled: Vec<i32> = (0..97)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 16) as i32 % 50 - 25
        })
        .collect();
    vec![
        ("empty", Vec::new()),
        ("single", vec![42]),
        ("five", vec![5, 3, 4, 1, 2]),
        ("sorted", (0..32).collect()),
        ("reversed", (0..32).rev().collect()),
        ("duplicates", vec![3, 1, 3, 1, 2, 2, 3, 1]),
        ("extremes", vec![i32::MAX, 0, i32::MIN, -1, 1]),
        ("scrambled", scrambled),
    ]
}

fn capture_sort() -> FixtureSet {
    let mut set = FixtureSet::new("sort", "host-libc");
    for (name, values) in sort_corpus() {
        set.push(
            format!("qsort_{name}"),
            "qsort",
            "ISO C 7.22.5.2",
            json!({ "values": values }),
            &json!(host_qsort(&values, false)),
        );
        // The host `qsort_r` argument order differs between C libraries, so
        // the contextual expectation comes from a plain descending sort.
        set.push(
            format!("qsort_r_descending_{name}"),
            "qsort_r",
            "GNU qsort_r",
            json!({ "values": values, "descending": true }),
            &json!(host_qsort(&values, true)),
        );
    }
    set
}
