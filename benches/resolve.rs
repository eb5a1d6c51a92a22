//! Benchmarks for colour resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chroma::{Chroma, ColourEntry, Value};

const CHAIN: usize = 100;

/// A `CHAIN`-long reference chain in `default`, overridden at the root by
/// `dark` and read through `night`.
fn chained_engine() -> Chroma {
    let mut chroma = Chroma::new();

    let mut entries = vec![ColourEntry::new("c0", Value::parse("#336699")).with_variant(
        "dim",
        "darken",
        vec![Value::Percent(10.0)],
    )];
    for i in 1..CHAIN {
        entries.push(ColourEntry::new(format!("c{}", i), Value::ident(format!("c{}", i - 1))));
    }
    chroma.add_colours(None, entries).unwrap();

    chroma.define_colour_scheme("dark", "Dark", Some("default")).unwrap();
    chroma
        .add_colours(Some("dark"), [ColourEntry::new("c0", Value::parse("#112233"))])
        .unwrap();
    chroma.define_colour_scheme("night", "Night", Some("dark")).unwrap();
    chroma
}

fn bench_resolve(c: &mut Criterion) {
    let chroma = chained_engine();
    let last = format!("c{}", CHAIN - 1);
    let resolver = chroma.resolver();

    let mut group = c.benchmark_group("resolve");

    group.bench_function("chain_default", |b| {
        b.iter(|| resolver.resolve(black_box("default"), black_box(&last)).unwrap())
    });

    group.bench_function("chain_inherited", |b| {
        b.iter(|| resolver.resolve(black_box("night"), black_box(&last)).unwrap())
    });

    group.bench_function("chain_variant", |b| {
        b.iter(|| {
            resolver
                .resolve_variant(black_box("night"), "c0", Some("dim"), &[])
                .unwrap()
        })
    });

    group.bench_function("colour_call", |b| {
        let args = [Value::ident(last.clone()), Value::ident("night")];
        b.iter(|| chroma.colour(black_box(&args)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
