//! Test execution engine.
//!
//! Each fixture case is replayed against the `tinylibc-abi` entry points on
//! buffers built from the case inputs. Results are rendered as JSON so that
//! hand-written and host-captured expectations compare the same way.
//! Comparison results are reduced to their sign, the only part C specifies.

use std::ffi::{c_char, c_int, c_void};

use serde_json::{Value, json};
use tinylibc_abi::{stdlib_abi, string_abi};

use crate::fixtures::{FixtureCase, FixtureSet, normalize_expected_output_value};
use crate::verify::{VerificationResult, render_diff};

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let actual = execute_case(case);
                let passed = actual == case.expected_output;
                VerificationResult {
                    trace_id: format!("{}::{}::{}", self.campaign, fixture_set.family, case.name),
                    family: fixture_set.family.clone(),
                    function: case.function.clone(),
                    case_name: case.name.clone(),
                    spec_section: case.spec_section.clone(),
                    passed,
                    expected: case.expected_output.clone(),
                    diff: (!passed).then(|| render_diff(&case.expected_output, &actual)),
                    actual,
                }
            })
            .collect()
    }
}

/// Replays one case and returns its canonical output.
#[must_use]
pub fn execute_case(case: &FixtureCase) -> String {
    let outcome = match case.function.as_str() {
        "stpcpy" | "__stpcpy" => run_stpcpy(case),
        "strcpy" => run_strcpy(case),
        "strcmp" => run_strcmp(case),
        "strncmp" => run_strncmp(case),
        "memset" => run_memset(case),
        "qsort" => run_qsort(case),
        "qsort_r" => run_qsort_r(case),
        other => Err(format!("unsupported:{other}")),
    };
    match outcome {
        Ok(value) => normalize_expected_output_value(&value),
        Err(reason) => reason,
    }
}

type Outcome = Result<Value, String>;

fn invalid(reason: impl std::fmt::Display) -> String {
    format!("invalid-input:{reason}")
}

/// Reads a byte-string input given either as a JSON string or an array of bytes.
pub(crate) fn bytes_input(case: &FixtureCase, key: &str) -> Result<Vec<u8>, String> {
    match case.inputs.get(key) {
        Some(Value::String(text)) => Ok(text.as_bytes().to_vec()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| invalid(format!("{key} holds a non-byte value")))
            })
            .collect(),
        _ => Err(invalid(format!("missing {key}"))),
    }
}

/// Byte-string input with a NUL appended.
pub(crate) fn c_string_input(case: &FixtureCase, key: &str) -> Result<Vec<u8>, String> {
    let mut bytes = bytes_input(case, key)?;
    bytes.push(0);
    Ok(bytes)
}

fn usize_input(case: &FixtureCase, key: &str) -> Result<Option<usize>, String> {
    match case.inputs.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(format!("{key} is not a size"))),
    }
}

fn byte_input(case: &FixtureCase, key: &str, default: u8) -> Result<u8, String> {
    match usize_input(case, key)? {
        None => Ok(default),
        Some(n) => u8::try_from(n).map_err(|_| invalid(format!("{key} is not a byte"))),
    }
}

pub(crate) fn i32_values(case: &FixtureCase) -> Result<Vec<i32>, String> {
    case.inputs
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing values"))?
        .iter()
        .map(|v| {
            v.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| invalid("values must be 32-bit integers"))
        })
        .collect()
}

/// Destination buffer for the copy routines: `dst_len` bytes of `fill`.
fn copy_destination(case: &FixtureCase, src: &[u8]) -> Result<Vec<u8>, String> {
    let dst_len = usize_input(case, "dst_len")?.unwrap_or(src.len());
    let needed = src.iter().position(|&b| b == 0).unwrap_or(src.len()) + 1;
    if dst_len < needed {
        return Err(invalid(format!("dst_len {dst_len} < {needed}")));
    }
    Ok(vec![byte_input(case, "fill", 0)?; dst_len])
}

fn run_stpcpy(case: &FixtureCase) -> Outcome {
    let src = c_string_input(case, "src")?;
    let mut dst = copy_destination(case, &src)?;
    // SAFETY: `src` is NUL-terminated and `dst` holds the string plus NUL.
    let end = unsafe {
        let base = dst.as_mut_ptr().cast::<c_char>();
        let end = if case.function == "__stpcpy" {
            string_abi::__stpcpy(base, src.as_ptr().cast())
        } else {
            string_abi::stpcpy(base, src.as_ptr().cast())
        };
        end.offset_from(base)
    };
    Ok(json!({ "end": end, "dst": dst }))
}

fn run_strcpy(case: &FixtureCase) -> Outcome {
    let src = c_string_input(case, "src")?;
    let mut dst = copy_destination(case, &src)?;
    let base = dst.as_mut_ptr().cast::<c_char>();
    // SAFETY: `src` is NUL-terminated and `dst` holds the string plus NUL.
    let ret = unsafe { string_abi::strcpy(base, src.as_ptr().cast()) };
    Ok(json!({ "returns_dst": ret == base, "dst": dst }))
}

fn run_strcmp(case: &FixtureCase) -> Outcome {
    let a = c_string_input(case, "a")?;
    let b = c_string_input(case, "b")?;
    // SAFETY: both inputs are NUL-terminated.
    let result = unsafe { string_abi::strcmp(a.as_ptr().cast(), b.as_ptr().cast()) };
    Ok(json!(result.signum()))
}

fn run_strncmp(case: &FixtureCase) -> Outcome {
    let a = c_string_input(case, "a")?;
    let b = c_string_input(case, "b")?;
    let n = usize_input(case, "n")?.ok_or_else(|| invalid("missing n"))?;
    // SAFETY: both inputs are NUL-terminated, which bounds every read.
    let result = unsafe { string_abi::strncmp(a.as_ptr().cast(), b.as_ptr().cast(), n) };
    Ok(json!(result.signum()))
}

fn run_memset(case: &FixtureCase) -> Outcome {
    let dst_len = usize_input(case, "dst_len")?.ok_or_else(|| invalid("missing dst_len"))?;
    let n = usize_input(case, "n")?.unwrap_or(dst_len);
    if n > dst_len {
        return Err(invalid(format!("n {n} > dst_len {dst_len}")));
    }
    let value = case
        .inputs
        .get("value")
        .and_then(Value::as_i64)
        .and_then(|v| c_int::try_from(v).ok())
        .ok_or_else(|| invalid("missing value"))?;
    let mut dst = vec![byte_input(case, "fill", 0)?; dst_len];
    let base = dst.as_mut_ptr().cast::<c_void>();
    // SAFETY: `dst` is writable for `n <= dst_len` bytes.
    let ret = unsafe { string_abi::memset(base, value, n) };
    Ok(json!({ "returns_dst": ret == base, "dst": dst }))
}

unsafe extern "C" fn compare_i32(a: *const c_void, b: *const c_void) -> c_int {
    // SAFETY: only used on `i32` arrays.
    let (a, b) = unsafe { (*a.cast::<i32>(), *b.cast::<i32>()) };
    a.cmp(&b) as c_int
}

unsafe extern "C" fn compare_i32_directed(
    a: *const c_void,
    b: *const c_void,
    descending: *mut c_void,
) -> c_int {
    // SAFETY: only used on `i32` arrays with a `bool` context.
    let (order, descending) = unsafe { (compare_i32(a, b), *descending.cast::<bool>()) };
    if descending { -order } else { order }
}

fn run_qsort(case: &FixtureCase) -> Outcome {
    let mut values = i32_values(case)?;
    // SAFETY: `values` is a valid `i32` array of the given length.
    unsafe {
        stdlib_abi::qsort(
            values.as_mut_ptr().cast(),
            values.len(),
            size_of::<i32>(),
            Some(compare_i32),
        );
    }
    Ok(json!(values))
}

fn run_qsort_r(case: &FixtureCase) -> Outcome {
    let mut values = i32_values(case)?;
    let mut descending = case
        .inputs
        .get("descending")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    // SAFETY: `values` is a valid `i32` array and the context is a live `bool`.
    unsafe {
        stdlib_abi::qsort_r(
            values.as_mut_ptr().cast(),
            values.len(),
            size_of::<i32>(),
            Some(compare_i32_directed),
            std::ptr::addr_of_mut!(descending).cast(),
        );
    }
    Ok(json!(values))
}
