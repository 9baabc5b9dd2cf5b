use maxlottery::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        detecting_sources,
        partitioning_components,
        solving_paradox_small,
        solving_paradox_large,
        summing_ascending,
        summing_frugal,
        tallying_ballots,
}

/// Complete tournament without a Condorcet winner, seeded for repeatability.
fn paradox(n: usize) -> Dominance {
    let ref mut rng = SmallRng::seed_from_u64(n as u64);
    loop {
        let mut relation = vec![false; n * n];
        for i in 0..n {
            for j in 0..i {
                match rng.random::<bool>() {
                    true => relation[i * n + j] = true,
                    false => relation[j * n + i] = true,
                }
            }
        }
        let graph = Dominance::new(n, relation).expect("valid tournament");
        if graph.sources().is_empty() {
            return graph;
        }
    }
}

fn detecting_sources(c: &mut criterion::Criterion) {
    let ref graph = paradox(64);
    c.bench_function("detect sources among 64 candidates", |b| {
        b.iter(|| graph.sources())
    });
}

fn partitioning_components(c: &mut criterion::Criterion) {
    let ref graph = paradox(64);
    c.bench_function("partition 64 candidates into components", |b| {
        b.iter(|| Partition::from(graph))
    });
}

fn solving_paradox_small(c: &mut criterion::Criterion) {
    let ref graph = paradox(8);
    let ref lottery = Lottery::new();
    c.bench_function("solve an 8-candidate paradox", |b| {
        b.iter(|| lottery.solve(graph))
    });
}

fn solving_paradox_large(c: &mut criterion::Criterion) {
    let ref graph = paradox(48);
    let ref lottery = Lottery::new();
    c.bench_function("solve a 48-candidate paradox", |b| {
        b.iter(|| lottery.solve(graph))
    });
}

fn summing_ascending(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let terms = (0..256).map(|_| rng.random::<Probability>()).collect::<Vec<_>>();
    c.bench_function("sum 256 terms with a sort buffer", |b| {
        b.iter(|| summation::ascending(&terms))
    });
}

fn summing_frugal(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let terms = (0..256).map(|_| rng.random::<Probability>()).collect::<Vec<_>>();
    c.bench_function("sum 256 terms without a buffer", |b| {
        b.iter(|| summation::frugal(&terms))
    });
}

fn tallying_ballots(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let ballots = (0..128)
        .map(|_| {
            let mut ranking = Ranking::default();
            for candidate in 0..16 {
                let low = rng.random_range(0..8);
                ranking
                    .rank(candidate, low, low + rng.random_range(0..2))
                    .expect("ordered bounds");
            }
            ranking
        })
        .collect::<Vec<_>>();
    c.bench_function("tally 128 preorder ballots over 16 candidates", |b| {
        b.iter(|| {
            let mut tally = Tally::new(16).expect("small tally");
            for ballot in ballots.iter() {
                ballot.cast_into(&mut tally).expect("ranked within tally");
            }
            tally
        })
    });
}
