use bion::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn u64_to_bytes_be(x: u64) -> Bytes { Bytes::from(u64::to_be_bytes(x).to_vec()) }

const N_BIG_ARR: usize = 2000;

fn big_arr() -> Bion {
    let v: Vec<Bion> = (0..N_BIG_ARR).map(|i| Bion::from(i as i64 - 1000)).collect();
    Bion::from(v)
}

const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_b() -> Bion {
    let v0: Vec<Bion> = (0..N_ARR)
        .map(|i| Bion::from(i as f64 * 1.5))
        .collect();
    let m: VecMap<Bytes, Bion> = (0..N_MAP)
        .map(|i| (u64_to_bytes_be(i as u64), Bion::from(v0.clone())))
        .collect();
    let v: Vec<Bion> = std::iter::repeat(m).map(Bion::from).take(N_ARR).collect();
    Bion::from(v)
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!(
            "Creating a Bion object of size {}",
            encode_full(&big_b()).unwrap().len()
        ),
        |b| b.iter(|| black_box(big_b())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let big_b = big_b();
    let enc_len = encode_full(&big_b).unwrap().len();
    c.bench_function(
        &format!("Encoding a Bion object, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_b))),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let big_b = big_b();
    let enc_len = encode_full(&big_b).unwrap().len();
    c.bench_function(
        &format!(
            "Encoding a Bion object, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                encode(black_box(&big_b), &mut out).map(|()| out)
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = Bytes::from(encode_full(&big_b()).unwrap());
    c.bench_function(
        &format!("Decoding a Bion object, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_bytes(black_box(enc.clone()))),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    let enc_len = encode_full(&big_arr).unwrap().len();
    c.bench_function(
        &format!("Encoding a Bion vector, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_arr))),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = encode_full(&big_arr()).unwrap();
    c.bench_function(
        &format!("Decoding a Bion vector of length {}", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc))),
    );
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat
);
criterion_main!(benches);
