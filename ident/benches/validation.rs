use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ident::{ALPHABET, ID_LEN, SwitchId, is_valid};

fn linear_scan(raw: &str) -> bool {
    raw.len() <= ID_LEN && raw.bytes().all(|b| ALPHABET.iter().any(|&a| a == b))
}

fn bench_validation(c: &mut Criterion) {
    let valid = SwitchId::random().into_inner();
    let mut invalid = valid.clone();
    invalid.replace_range(ID_LEN - 1.., "-");

    let mut group = c.benchmark_group("validate");
    for (label, input) in [("valid", valid.as_str()), ("invalid_tail", invalid.as_str())] {
        group.bench_with_input(BenchmarkId::new("table", label), input, |b, s| {
            b.iter(|| is_valid(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("linear", label), input, |b, s| {
            b.iter(|| linear_scan(black_box(s)))
        });
    }
    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    c.bench_function("generate_random", |b| b.iter(SwitchId::random));
}

criterion_group!(benches, bench_validation, bench_generation);
criterion_main!(benches);
