use cogbench_core::Key;
use cogbench_engine::{
    EngineCallbacks, GoNoGo, NBack, Paradigm, Stroop, SyntheticParticipant, TrialEngine,
};
use cogbench_timing::ManualTimer;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn engine<P: Paradigm>(paradigm: P) -> TrialEngine<P, ManualTimer, StdRng> {
    TrialEngine::new(
        paradigm,
        ManualTimer::new(),
        StdRng::seed_from_u64(7),
        EngineCallbacks::noop(),
    )
}

pub fn bench_full_sessions(c: &mut Criterion) {
    let mut g = c.benchmark_group("session");
    g.sample_size(60);
    let who = SyntheticParticipant::default();

    g.bench_function("go_no_go", |b| {
        b.iter_batched(
            || (engine(GoNoGo::default()), StdRng::seed_from_u64(1)),
            |(mut e, mut rng)| black_box(who.play(&mut e, &mut rng)),
            BatchSize::SmallInput,
        )
    });

    g.bench_function("n_back", |b| {
        b.iter_batched(
            || (engine(NBack::default()), StdRng::seed_from_u64(2)),
            |(mut e, mut rng)| black_box(who.play(&mut e, &mut rng)),
            BatchSize::SmallInput,
        )
    });

    g.bench_function("stroop", |b| {
        b.iter_batched(
            || (engine(Stroop::default()), StdRng::seed_from_u64(3)),
            |(mut e, mut rng)| black_box(who.play(&mut e, &mut rng)),
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

// Input path only: irrelevant keys against an armed trial
pub fn bench_key_dispatch(c: &mut Criterion) {
    let mut g = c.benchmark_group("key_dispatch");
    let keys = [Key::digit(7), Key::letter('q'), Key::new(Key::ARROW_LEFT)];

    g.bench_function("ignored_keys", |b| {
        b.iter_batched(
            || {
                let mut e = engine(Stroop::default());
                e.start();
                e.advance(Duration::from_millis(1500));
                e
            },
            |mut e| {
                for key in &keys {
                    black_box(e.handle_key(black_box(key)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(benches, bench_full_sessions, bench_key_dispatch);
criterion_main!(benches);
