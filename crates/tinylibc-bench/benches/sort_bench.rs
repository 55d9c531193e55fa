//! `qsort` throughput over integer arrays in several initial orders.

use std::cell::RefCell;
use std::ffi::{c_int, c_void};
use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tinylibc_abi::stdlib_abi;
use tinylibc_bench::{BenchStats, pseudorandom_i32};

unsafe extern "C" fn cmp_i32(a: *const c_void, b: *const c_void) -> c_int {
    // SAFETY: only used on `i32` arrays.
    let (a, b) = unsafe { (*a.cast::<i32>(), *b.cast::<i32>()) };
    a.cmp(&b) as c_int
}

fn inputs(len: usize) -> [(&'static str, Vec<i32>); 3] {
    let ascending: Vec<i32> = (0..len as i32).collect();
    let descending: Vec<i32> = ascending.iter().rev().copied().collect();
    [
        ("random", pseudorandom_i32(len, 0x2545_F491)),
        ("ascending", ascending),
        ("descending", descending),
    ]
}

fn bench_qsort(c: &mut Criterion) {
    let mut group = c.benchmark_group("qsort_i32");
    for len in [64usize, 1024, 16_384] {
        group.throughput(Throughput::Elements(len as u64));
        for (order, template) in inputs(len) {
            let stats = RefCell::new(BenchStats::default());
            group.bench_function(BenchmarkId::new(order, len), |b| {
                b.iter_custom(|iters| {
                    let mut total = Duration::ZERO;
                    for _ in 0..iters {
                        let mut values = template.clone();
                        let start = Instant::now();
                        // SAFETY: `values` is a valid `i32` array.
                        unsafe {
                            stdlib_abi::qsort(
                                values.as_mut_ptr().cast(),
                                values.len(),
                                size_of::<i32>(),
                                Some(cmp_i32),
                            );
                        }
                        total += start.elapsed();
                        black_box(&values);
                    }
                    let total = total.max(Duration::from_nanos(1));
                    stats.borrow_mut().record(iters, total);
                    total
                });
            });
            stats.borrow().report(&format!("qsort/{order}/{len}"));
        }
    }
    group.finish();
}

fn bench_core_qsort(c: &mut Criterion) {
    let template: Vec<u8> = pseudorandom_i32(1024, 0x9E37_79B9)
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    c.bench_function("core_qsort_bytes/1024", |b| {
        b.iter_batched_ref(
            || template.clone(),
            |bytes| {
                tinylibc_core::stdlib::qsort(bytes, 4, |a, b| {
                    let a = i32::from_ne_bytes([a[0], a[1], a[2], a[3]]);
                    let b = i32::from_ne_bytes([b[0], b[1], b[2], b[3]]);
                    a.cmp(&b) as i32
                });
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(sort_benches, bench_qsort, bench_core_qsort);
criterion_main!(sort_benches);
