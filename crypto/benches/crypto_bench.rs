use criterion::{black_box, criterion_group, criterion_main, Criterion};
use guild_types::{ChainId, Salt};

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| guild_crypto::blake2b_256(black_box(&data)))
    });
}

fn blake2b_multi_bench(c: &mut Criterion) {
    let parts: Vec<&[u8]> = vec![&[1u8; 32], &[2u8; 64], &[3u8; 128]];

    c.bench_function("blake2b_256_multi_3parts", |b| {
        b.iter(|| guild_crypto::blake2b_256_multi(black_box(&parts)))
    });
}

fn org_address_prediction_bench(c: &mut Criterion) {
    let factory = guild_crypto::address_from_label("factory");
    let creator = guild_crypto::address_from_label("creator");
    let implementation = guild_crypto::address_from_label("org-impl");
    let salt = Salt::from_text("bench").expect("short salt");

    c.bench_function("predict_org_address", |b| {
        b.iter(|| {
            let derived =
                guild_crypto::derive_org_salt(&creator, &creator, ChainId::DEV, black_box(&salt));
            let code = guild_crypto::proxy_init_code_hash(&implementation, &[]);
            guild_crypto::create2_address(&factory, &derived, &code)
        })
    });
}

criterion_group!(
    benches,
    blake2b_256_bench,
    blake2b_multi_bench,
    org_address_prediction_bench,
);
criterion_main!(benches);
