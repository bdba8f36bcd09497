use criterion::{black_box, criterion_group, criterion_main, Criterion};
use p8::script::convert::{tonum, tostr};
use p8::script::split::{split, Delimiter};
use p8::script::value::Value;
use p8::Fix32;

fn make_csv(fields: usize) -> Vec<u8> {
    (0..fields)
        .map(|i| format!("{}", i as f64 * 1.25))
        .collect::<Vec<_>>()
        .join(",")
        .into_bytes()
}

fn bench_tostr(c: &mut Criterion) {
    let values: Vec<Value> = [0, 1, -1, 0x1_8000, 0x7fff_ffff, i32::MIN, 0x0003_243f]
        .into_iter()
        .map(|b| Value::Num(Fix32::from_bits(b)))
        .collect();

    let mut g = c.benchmark_group("tostr");
    g.bench_function("decimal", |b| {
        b.iter(|| {
            for v in &values {
                black_box(tostr(Some(black_box(v)), false));
            }
        })
    });
    g.bench_function("hex", |b| {
        b.iter(|| {
            for v in &values {
                black_box(tostr(Some(black_box(v)), true));
            }
        })
    });
    g.finish();
}

fn bench_tonum(c: &mut Criterion) {
    let inputs: Vec<Value> = ["42", "-1.5", "0x1.8", "0b101.1", "3.14159", " 1e3 ", "not a number"]
        .into_iter()
        .map(Value::str)
        .collect();

    c.bench_function("tonum", |b| {
        b.iter(|| {
            for v in &inputs {
                black_box(tonum(Some(black_box(v))));
            }
        })
    });
}

fn bench_split(c: &mut Criterion) {
    let small = make_csv(10);
    let large = make_csv(1000);

    let mut g = c.benchmark_group("split");
    g.bench_function("convert_small", |b| {
        b.iter(|| split(black_box(&small), Delimiter::Needle(b','), true))
    });
    g.bench_function("convert_large", |b| {
        b.iter(|| split(black_box(&large), Delimiter::Needle(b','), true))
    });
    g.bench_function("raw_large", |b| {
        b.iter(|| split(black_box(&large), Delimiter::Needle(b','), false))
    });
    g.bench_function("chunk_large", |b| {
        b.iter(|| split(black_box(&large), Delimiter::Chunk(4), false))
    });
    g.finish();
}

criterion_group!(benches, bench_tostr, bench_tonum, bench_split);
criterion_main!(benches);
