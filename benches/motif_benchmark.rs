use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use motifseq::{basic_motifs, generate_motifs, merge_motifs, MotifUnit};

/// Generate a synthetic symbol sequence with a planted recurring motif.
fn generate_synthetic_sequence(n: usize, alphabet: usize, plant_every: usize) -> Vec<MotifUnit> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut units = Vec::with_capacity(n);

    for index in 0..n {
        if plant_every > 0 && index % plant_every < 3 {
            // Plant "P0,P1,P2" so the extension loop has real work to do.
            units.push(MotifUnit::new(format!("P{}", index % plant_every)));
        } else {
            let symbol = (b'A' + rng.gen_range(0..alphabet as u8)) as char;
            units.push(MotifUnit::new(symbol.to_string()));
        }
    }

    units
}

fn bench_base_motifs(c: &mut Criterion) {
    let mut group = c.benchmark_group("base_motifs");

    for n in [100, 500, 1000] {
        let units = generate_synthetic_sequence(n, 26, 20);
        group.bench_with_input(BenchmarkId::new("build", n), &units, |b, units| {
            b.iter(|| basic_motifs(black_box(units), 2));
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let units = generate_synthetic_sequence(1000, 26, 20);
    let base = basic_motifs(&units, 2);

    c.bench_function("merge_single_pair", |b| {
        b.iter(|| merge_motifs(black_box(&base[0]), black_box(&base[1]), 1, 4));
    });
}

fn bench_generate_motifs(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_motifs");

    for n in [100, 500, 1000] {
        let units = generate_synthetic_sequence(n, 26, 20);
        group.bench_with_input(BenchmarkId::new("discover", n), &units, |b, units| {
            b.iter(|| generate_motifs(black_box(units), 2, 1, 1, 4));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_base_motifs,
    bench_merge,
    bench_generate_motifs
);
criterion_main!(benches);
