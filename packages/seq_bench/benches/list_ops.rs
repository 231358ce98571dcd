//! Compares the linked list backed by the global heap against the same list backed by a bump
//! arena, for the operations where node allocation dominates.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::{Duration, Instant};

use bump_arena::{Arena, ArenaCapacity};
use criterion::{Criterion, criterion_group, criterion_main};
use seq_bench::{List, NODE_OVERHEAD, TrivialSmall, Value};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

const ELEMENTS: usize = 10_000;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_ops");

    group.bench_function("push_back_heap", |b| {
        b.iter(|| {
            let mut list = List::new();
            for key in 0..ELEMENTS {
                list.push_back(TrivialSmall::from_key(key));
            }
            black_box(list)
        });
    });

    group.bench_function("push_back_arena", |b| {
        b.iter_custom(|iters| {
            let capacity = ArenaCapacity::for_elements::<TrivialSmall>(NODE_OVERHEAD, ELEMENTS);
            let start = Instant::now();

            for _ in 0..iters {
                let arena = Arena::with_capacity(capacity);
                let mut list = List::new_in(arena.allocator());

                for key in 0..ELEMENTS {
                    list.push_back(TrivialSmall::from_key(key));
                }

                black_box(&list);
            }

            start.elapsed()
        });
    });

    group.bench_function("sort_heap", |b| {
        b.iter_custom(|iters| {
            let mut elapsed = Duration::ZERO;

            for _ in 0..iters {
                let mut list: List<TrivialSmall> = (0..ELEMENTS)
                    .rev()
                    .map(TrivialSmall::from_key)
                    .collect();

                let start = Instant::now();
                list.sort();
                elapsed = elapsed.saturating_add(start.elapsed());

                black_box(list);
            }

            elapsed
        });
    });

    group.finish();
}
