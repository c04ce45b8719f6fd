//! Token issue and verify benchmarks
//!
//! Measures the full pipeline for typical family tokens and for payloads
//! approaching the size limit.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use famtoken::*;
use serde_json::{Map, Value, json};
use std::sync::Arc;

const NOW: i64 = 1_700_000_000;

fn service() -> TokenService {
    TokenService::with_clock(
        Secret::try_from("bench-secret-for-family-tokens").unwrap(),
        Arc::new(FixedClock(NOW)),
    )
}

fn identity_with_padding(extra_size: usize) -> Map<String, Value> {
    let Value::Object(mut map) = json!({"family_id": "fam_1", "role": "member"}) else {
        unreachable!()
    };
    if extra_size > 0 {
        map.insert("data".into(), Value::String("x".repeat(extra_size)));
    }
    map
}

fn bench_issue(c: &mut Criterion) {
    let service = service();
    let options = IssueOptions::default();
    let identity = identity_with_padding(0);

    c.bench_function("issue", |b| {
        b.iter(|| service.issue(black_box(identity.clone()), &options).unwrap());
    });
}

fn bench_verify(c: &mut Criterion) {
    let service = service();
    let options = VerifyOptions::default();
    let mut group = c.benchmark_group("verify");

    for size in [0, 1024, 16 * 1024, 40 * 1024] {
        let token = service
            .issue(identity_with_padding(size), &IssueOptions::default())
            .unwrap();

        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_function(format!("payload_{size}"), |b| {
            b.iter(|| service.verify(black_box(&token), &options).unwrap());
        });
    }

    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let service = service();
    let options = VerifyOptions::default();
    let token = service
        .issue(identity_with_padding(0), &IssueOptions::default())
        .unwrap();
    let (head, last) = token.split_at(token.len() - 1);
    let forged = format!("{head}{}", if last == "A" { "B" } else { "A" });
    let malformed = "not-a-token";

    let mut group = c.benchmark_group("reject");
    group.bench_function("bad_signature", |b| {
        b.iter(|| service.verify(black_box(&forged), &options).unwrap_err());
    });
    group.bench_function("malformed", |b| {
        b.iter(|| service.verify(black_box(malformed), &options).unwrap_err());
    });
    group.bench_function("bearer_then_verify", |b| {
        let header = format!("Bearer {token}");
        b.iter(|| authenticate(black_box(Some(header.as_str())), &service, &options).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_issue, bench_verify, bench_rejections);
criterion_main!(benches);
