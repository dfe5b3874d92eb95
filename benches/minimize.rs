use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfa_minimization::{prelude::*, random::generate_random_dfa};

fn random_automata(size: usize) -> Vec<Dfa> {
    let mut rng = fastrand::Rng::with_seed(size as u64);
    (0..10)
        .map(|_| generate_random_dfa(size, 3, 0.3, &mut rng))
        .collect()
}

fn prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("prune_unreachable");
    for size in [16, 64, 256] {
        let automata = random_automata(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &automata, |b, automata| {
            b.iter(|| {
                for dfa in automata {
                    let mut dfa = dfa.clone();
                    black_box(dfa.prune_unreachable());
                }
            })
        });
    }
    group.finish();
}

fn minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for size in [16, 64, 256] {
        let automata = random_automata(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &automata, |b, automata| {
            b.iter(|| {
                for dfa in automata {
                    black_box(dfa.clone().minimize().unwrap());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, prune, minimize);
criterion_main!(benches);
