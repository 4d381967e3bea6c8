use criterion::{criterion_group, criterion_main, Criterion};
use ilp_event_learner::{subsumes, Clause, Literal, Term};

fn build_chain_clause(vars: usize) -> Clause {
    let head = Literal::positive("p", vec![Term::var("X0")]);
    let body = (0..vars)
        .map(|i| Literal::positive("q", vec![Term::var(format!("X{i}")), Term::var(format!("X{}", i + 1))]))
        .collect();
    Clause::new(Some(head), body)
}

fn build_ground_chain(vars: usize) -> Clause {
    let head = Literal::positive("p", vec![Term::constant("c0")]);
    let body = (0..vars)
        .map(|i| Literal::positive("q", vec![Term::constant(format!("c{i}")), Term::constant(format!("c{}", i + 1))]))
        .collect();
    Clause::new(Some(head), body)
}

fn bench_subsumes_small(c: &mut Criterion) {
    let c1 = build_chain_clause(3);
    let c2 = build_ground_chain(3);
    c.bench_function("subsumes_3_vars", |b| b.iter(|| subsumes(&c1, &c2)));
}

fn bench_subsumes_at_cap(c: &mut Criterion) {
    let c1 = build_chain_clause(8);
    let c2 = build_ground_chain(8);
    c.bench_function("subsumes_8_vars_at_cap", |b| b.iter(|| subsumes(&c1, &c2)));
}

criterion_group!(benches, bench_subsumes_small, bench_subsumes_at_cap);
criterion_main!(benches);
