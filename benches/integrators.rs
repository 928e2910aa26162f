// benches/integrators.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oscsim::{
    ChainParameters, ChainSimulation, IntegratorKind, MemorySink, Oscillator, SingleSimulation,
};

fn bench_single_oscillator(c: &mut Criterion) {
    let oscillator = Oscillator::new(70.0, 1e4, 100.0, 1.0, -100.0 / 140.0).unwrap();

    for kind in IntegratorKind::ALL {
        let simulation = SingleSimulation::new(oscillator.clone(), kind, 1e-3, 5.0).unwrap();
        c.bench_function(&format!("single_{}_5s", kind), |b| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                black_box(simulation.run(&mut sink).unwrap())
            })
        });
    }
}

fn bench_chain(c: &mut Criterion) {
    let params = ChainParameters {
        n: 1000,
        m: 0.00021,
        k: 102.3,
        gamma: 0.0003,
        a: 0.01,
        omega: 2.0 * std::f64::consts::PI,
    };
    let simulation = ChainSimulation::new(params, 1e-4, 0.1).unwrap();

    c.bench_function("chain_n1000_1000_steps", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            black_box(simulation.run(&mut sink).unwrap())
        })
    });
}

criterion_group!(benches, bench_single_oscillator, bench_chain);
criterion_main!(benches);
