use criterion::{criterion_group, criterion_main};

mod network;

criterion_group!(
    benches,
    network::application::http::client::bench_build_get,
    network::application::http::client::bench_encode_and_build_post,
    network::application::http::client::bench_parse_response,
    network::application::http::client::bench_get_exchange
);
criterion_main!(benches);
