//! Benchmark harness for the registration pass.
//!
//! Uses criterion for reliable benchmarking.
//! Run with: cargo bench -p hype_checker

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hype_ast::build::*;
use hype_ast::SourceFile;
use hype_checker::{check, Registrar, RegistrationOptions};

/// Interfaces, functions and calls, with no forward `this` references.
fn plain_program(functions: usize) -> SourceFile {
    let mut constructs = vec![
        interface("Person", vec![field("name", ty("string")), optional_field("age", ty("number"))]),
        interface(
            "Greeter",
            vec![method("greet", vec![param("who", ty("Person"))], Some(ty("string")))],
        ),
    ];
    for i in 0..functions {
        let name = format!("fn_{i}");
        constructs.push(stmt(fn_decl(
            &name,
            vec![param("p", ty("Person")), optional_param("n", ty("number"))],
            Some(union(vec![ty("string"), ty("number")])),
            vec![
                let_("local", object(vec![("name", string("x")), ("age", num(i as f64))])),
                ret(chain("p", vec![access("name")])),
                ret(num(0.0)),
            ],
        )));
        constructs.push(stmt(expr(call(&name, vec![object(vec![("name", string("y"))])]))));
    }
    source(constructs)
}

/// Object literals whose methods reach members declared after them.
fn forward_reference_program(objects: usize, members: usize) -> SourceFile {
    let mut constructs = Vec::with_capacity(objects);
    for i in 0..objects {
        let mut fields = Vec::with_capacity(members * 2);
        let names: Vec<String> = (0..members).map(|m| format!("value_{m}")).collect();
        for (m, target) in names.iter().enumerate() {
            let getter = format!("get_{m}");
            fields.push((getter, func(vec![], None, vec![ret(this_chain(vec![access(target)]))])));
        }
        for (m, target) in names.iter().enumerate() {
            fields.push((target.clone(), num(m as f64)));
        }
        let fields = fields.iter().map(|(name, value)| (name.as_str(), value.clone())).collect();
        constructs.push(stmt(let_(&format!("obj_{i}"), object(fields))));
    }
    source(constructs)
}

// ============================================================================
// Registration Benchmarks
// ============================================================================

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for size in [10, 100] {
        let program = plain_program(size);
        group.bench_with_input(BenchmarkId::new("plain", size), &program, |b, program| {
            b.iter(|| {
                let registrar = Registrar::new(RegistrationOptions::default());
                let registration = registrar.register(black_box(program));
                black_box(registration.is_ok())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Forward Reference Benchmarks
// ============================================================================

fn bench_forward_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_references");

    for members in [1, 8] {
        let program = forward_reference_program(10, members);
        group.bench_with_input(BenchmarkId::new("members", members), &program, |b, program| {
            b.iter(|| black_box(check(black_box(program), RegistrationOptions::default()).is_ok()));
        });
    }

    group.finish();
}

// ============================================================================
// Full Check Benchmarks
// ============================================================================

fn bench_check(c: &mut Criterion) {
    let program = plain_program(50);
    c.bench_function("check/plain_50", |b| {
        b.iter(|| black_box(check(black_box(&program), RegistrationOptions::default()).is_ok()));
    });
}

criterion_group!(benches, bench_registration, bench_forward_references, bench_check);
criterion_main!(benches);
