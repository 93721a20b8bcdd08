use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rbtree_collections::red_black_tree::RedBlackMap;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 1000;

fn random_pairs() -> Vec<(u32, u32)> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..NUM_OF_OPERATIONS).map(|_| (rng.gen(), rng.gen())).collect()
}

macro_rules! map_benches {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use super::{random_pairs, BTreeMap, RedBlackMap};
                use criterion::{black_box, Criterion};

                pub fn bench_insert(c: &mut Criterion) {
                    let pairs = random_pairs();
                    c.bench_function(&format!("bench {} insert", stringify!($module_name)), |b| {
                        b.iter(|| {
                            let mut map = $type_name::new();
                            for (key, value) in &pairs {
                                map.insert(*key, *value);
                            }
                            map
                        })
                    });
                }

                pub fn bench_get(c: &mut Criterion) {
                    let pairs = random_pairs();
                    let mut map = $type_name::new();
                    for (key, value) in &pairs {
                        map.insert(*key, *value);
                    }

                    c.bench_function(&format!("bench {} get", stringify!($module_name)), |b| {
                        b.iter(|| {
                            for (key, _) in &pairs {
                                black_box(map.get(key));
                            }
                        })
                    });
                }

                pub fn bench_remove(c: &mut Criterion) {
                    let pairs = random_pairs();
                    let mut full = $type_name::new();
                    for (key, value) in &pairs {
                        full.insert(*key, *value);
                    }

                    c.bench_function(&format!("bench {} remove", stringify!($module_name)), |b| {
                        b.iter(|| {
                            let mut map = full.clone();
                            for (key, _) in &pairs {
                                black_box(map.remove(key));
                            }
                        })
                    });
                }
            }
        )*
    }
}

map_benches!(
    btreemap: BTreeMap,
    red_black_tree: RedBlackMap,
);

fn bench_btreemap_lower_bound(c: &mut Criterion) {
    let pairs = random_pairs();
    let map: BTreeMap<u32, u32> = pairs.iter().cloned().collect();
    c.bench_function("bench btreemap lower bound", |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.range(key.wrapping_add(1)..).next());
            }
        })
    });
}

fn bench_red_black_tree_lower_bound(c: &mut Criterion) {
    let pairs = random_pairs();
    let map: RedBlackMap<u32, u32> = pairs.iter().cloned().collect();
    c.bench_function("bench red_black_tree lower bound", |b| {
        b.iter(|| {
            for (key, _) in &pairs {
                black_box(map.lower_bound(&key.wrapping_add(1)).key());
            }
        })
    });
}

criterion_group!(
    benches,
    btreemap::bench_insert,
    btreemap::bench_get,
    btreemap::bench_remove,
    bench_btreemap_lower_bound,
    red_black_tree::bench_insert,
    red_black_tree::bench_get,
    red_black_tree::bench_remove,
    bench_red_black_tree_lower_bound,
);
criterion_main!(benches);
