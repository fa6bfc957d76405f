use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_tree::RedBlackTree;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
    limit: u32,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: u32 = 1_000_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> u32 {
        self.rng.gen_range(0..self.limit)
    }
}

// random insert helper fn
fn tree_insert_random(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = RedBlackTree::new();
        for k in keys.iter().copied() {
            tree.insert(k);
        }
        black_box(tree)
    });
}

// ascending insert helper fn, every insert lands on the rightmost spine
fn tree_insert_ascending(count: usize, bench: &mut Bencher) {
    bench.iter(|| {
        let mut tree = RedBlackTree::new();
        for k in 0..count as u32 {
            tree.insert(k);
        }
        black_box(tree)
    });
}

// in-order iteration helper fn
fn tree_iter(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let tree: RedBlackTree<u32> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| black_box(tree.iter().map(|&k| u64::from(k)).sum::<u64>()));
}

fn bench_tree_insert_random(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_random_100", |b| {
        tree_insert_random(100, b)
    });
    c.bench_function("bench_tree_insert_random_1000", |b| {
        tree_insert_random(1000, b)
    });
    c.bench_function("bench_tree_insert_random_10,000", |b| {
        tree_insert_random(10_000, b)
    });
    c.bench_function("bench_tree_insert_random_100,000", |b| {
        tree_insert_random(100_000, b)
    });
}

fn bench_tree_insert_ascending(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_ascending_1000", |b| {
        tree_insert_ascending(1000, b)
    });
    c.bench_function("bench_tree_insert_ascending_100,000", |b| {
        tree_insert_ascending(100_000, b)
    });
}

fn bench_tree_iter(c: &mut Criterion) {
    c.bench_function("bench_tree_iter_1000", |b| tree_iter(1000, b));
    c.bench_function("bench_tree_iter_100,000", |b| tree_iter(100_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_tree_insert_random, bench_tree_insert_ascending,
}

criterion_group! {
    name = benches_iter;
    config = criterion_config();
    targets = bench_tree_iter
}

criterion_main!(benches_basic_op, benches_iter);
