//! Benchmarks for the per-request payload rewrites

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prost::Message;
use spoof_client_proxy::clienttoken::{
    ChallengeAnswersRequest, ClientDataRequest, ClientTokenRequest, ClientTokenRequestType,
    ConnectivitySdkData, client_data_request, client_token_request,
};
use spoof_client_proxy::config::ClientMetadata;
use spoof_client_proxy::handlers::ap_resolve::spoof_spclient_hosts;
use spoof_client_proxy::handlers::client_token::rewrite_client_token_request;
use spoof_client_proxy::handlers::playplay::patch_playplay_token;
use spoof_client_proxy::profile::ClientProfile;

const AP_RESOLVE_DOCUMENT: &str = r#"{
    "accesspoint": ["ap-gew4.spotify.com:4070", "ap-gew4.spotify.com:443", "ap-gew4.spotify.com:80"],
    "dealer": ["gew4-dealer.spotify.com:443", "gue1-dealer.spotify.com:443"],
    "spclient": ["gew4-spclient.spotify.com:443", "gue1-spclient.spotify.com:443"]
}"#;

fn bench_client_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("client_token");
    let profile = ClientProfile::new(&ClientMetadata::default(), 4345).unwrap();

    let client_data = Bytes::from(
        ClientTokenRequest {
            request_type: ClientTokenRequestType::RequestClientDataRequest as i32,
            request: Some(client_token_request::Request::ClientData(ClientDataRequest {
                client_version: "1.2.31.1205.g4d59ad7c".to_string(),
                client_id: "65b708073fc0480ea92a077233ca87bd".to_string(),
                data: Some(client_data_request::Data::ConnectivitySdkData(ConnectivitySdkData {
                    platform_specific_data: None,
                    device_id: "6bc9f1d1c2a04e1b9a1c3c0f9a7e2d11".to_string(),
                })),
            })),
        }
        .encode_to_vec(),
    );

    let challenge_answers = Bytes::from(
        ClientTokenRequest {
            request_type: ClientTokenRequestType::RequestChallengeAnswersRequest as i32,
            request: Some(client_token_request::Request::ChallengeAnswers(ChallengeAnswersRequest {
                state: "AQBd8rQbG5h1".to_string(),
                answers: vec![],
            })),
        }
        .encode_to_vec(),
    );

    group.bench_function("rewrite_client_data", |b| {
        b.iter(|| black_box(rewrite_client_token_request(black_box(&client_data), &profile)));
    });

    group.bench_function("forward_challenge_answers", |b| {
        b.iter(|| black_box(rewrite_client_token_request(black_box(&challenge_answers), &profile)));
    });

    group.finish();
}

fn bench_playplay(c: &mut Criterion) {
    let mut group = c.benchmark_group("playplay");
    let payload: Vec<u8> = (0..=255u8).cycle().take(1024).collect();

    group.bench_function("patch_token", |b| {
        b.iter(|| {
            let mut buffer = payload.clone();
            let result = patch_playplay_token(black_box(&mut buffer));
            black_box((result, buffer));
        });
    });

    group.finish();
}

fn bench_ap_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("ap_resolve");

    group.bench_function("spoof_spclient_hosts", |b| {
        b.iter(|| black_box(spoof_spclient_hosts(black_box(AP_RESOLVE_DOCUMENT), "localhost:4345")));
    });

    group.finish();
}

criterion_group!(benches, bench_client_token, bench_playplay, bench_ap_resolve);
criterion_main!(benches);
