use criterion::{criterion_group, criterion_main, Criterion};
use http_message_signing::{cavage, signature_input};
use std::hint::black_box;

const CAVAGE_HEADER_1: &str = r#"keyId="Test",algorithm="rsa-sha256",created=1402170695,headers="(request-target) host date",signature="qdx+H7PHHDZgy4y/Ahn9Tny9V3GP6YgBPyUXMmoxWtLbHpUnXS2mg2+SbrQDMCJypxBLSPQR2aAjn7ndmw2iicw3HMbe8VfEdKFYRqzic+efkb3nndiv/x1xSHDJWeSWkx3ButlYSuBskLu6kd9Fswtemr3lgdDEmn04swr2Os0=""#;
const CAVAGE_HEADER_2: &str = r#"keyId="Test",algorithm="rsa-sha256",created=1402170695, expires=1402170699,headers="(request-target) (created) (expires) host date content-type digest content-length",signature="vSdrb+dS3EceC9bcwHSo4MlyKS59iFIrhgYkz8+oVLEEzmYZZvRs8rgOp+63LEM3v+MFHB32NfpB2bEKBIvB1q52LaEUHFv120V01IL+TAD48XaERZFukWgHoBTLMhYS2Gb51gWxpeIq8knRmPnYePbF5MOkR0Zkly4zKH7s1dE=""#;

const SIGNATURE_INPUT: &str = r#"sig1=("@method" "@authority" "@path" "content-digest" "content-length" "content-type");created=1618884473;keyid="test-key-rsa-pss";alg="rsa-pss-sha512""#;
const SIGNATURE: &str = "sig1=:HIbjHC5rS0BYaa9v4QfD4193TORw7u9edguPh0AW3dMq9WImrlFrCGUDih47vAxi4L2YRZ3XMJc1uOKk/J0ZmZ+wcta4nKIgBkKq0rM9hs3CQyxXGxHLMCy8uqK488o+9jrptQ+xFPHK7a9sRL1IXNaagCNN3ZxJsYapFj+JXbmaI5rtAdSfSvzPuBCh+ARHBmWuNo1UzVVdHXrl8ePL4cccqlazIJdC4QEjrF+Sn4IxBQzTZsL9y9TP5FsZYzHvDqbInkTNigBcE9cKOYNFCn4D/WM7F6TNuZO9EgtzepLWcjTymlHzK7aXq6Am6sfOrpIC49yXjj3ae6HRalVc/g==:";

fn cavage_header(c: &mut Criterion) {
    c.bench_function("parse_cavage_header1", |b| {
        b.iter(|| {
            let _ = black_box(cavage::parse(black_box(CAVAGE_HEADER_1)));
        });
    });

    c.bench_function("parse_cavage_header2", |b| {
        b.iter(|| {
            let _ = black_box(cavage::parse(black_box(CAVAGE_HEADER_2)));
        });
    });
}

fn signature_input_header(c: &mut Criterion) {
    c.bench_function("parse_signature_input", |b| {
        b.iter(|| {
            let _ = black_box(signature_input::parse(
                black_box(SIGNATURE),
                black_box(SIGNATURE_INPUT),
            ));
        });
    });
}

criterion_group!(parse_signature_header, cavage_header, signature_input_header);
criterion_main!(parse_signature_header);
