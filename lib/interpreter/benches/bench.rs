use criterion::{criterion_group, criterion_main, Criterion};
use interpreter::{Compute, Grammar, Interpreter};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        let source = "(10 * (-20 / 8)) + 3.25 - 1 // trailing comment\n".repeat(64);
        b.iter(|| scanner::tokenize(&source))
    });

    c.bench_function("parse and compute chained arithmetic", |b| {
        let source = (1..=200).map(|n| n.to_string()).collect::<Vec<_>>().join(" + ");
        let interpreter =
            Interpreter::new().with_grammar(Grammar { chain_operators: true, group_expressions: true });
        b.iter(|| interpreter.parse_source(&source).unwrap().compute().unwrap())
    });

    c.bench_function("run nested groups", |b| {
        let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let interpreter = Interpreter::new();
        b.iter(|| {
            let mut output = Vec::new();
            interpreter.run_source(&source, &mut output).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
