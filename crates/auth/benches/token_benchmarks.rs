use criterion::{Criterion, black_box, criterion_group, criterion_main};

use brewops_auth::{
    Argon2Hasher, Hs256Jwt, JwtIssuer, JwtValidator, Password, Username,
    default_access_token_ttl,
};
use chrono::Utc;

fn bench_token_issue_and_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_token");
    let jwt = Hs256Jwt::new("bench-secret-0123456789abcdef0123456789");
    let subject = Username::parse("alice").unwrap();

    group.bench_function("issue", |b| {
        b.iter(|| {
            jwt.issue(black_box(&subject), Utc::now(), default_access_token_ttl())
                .unwrap()
        });
    });

    let token = jwt
        .issue(&subject, Utc::now(), default_access_token_ttl())
        .unwrap();
    group.bench_function("validate", |b| {
        b.iter(|| jwt.validate(black_box(token.as_str()), Utc::now()).unwrap());
    });

    group.finish();
}

fn bench_password_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("password");
    group.sample_size(10);

    // Production cost parameters: this is the per-login price.
    let hasher = Argon2Hasher::new().unwrap();
    let password = Password::new("correct horse battery staple");
    let hash = hasher.hash(&password).unwrap();

    group.bench_function("hash_default_params", |b| {
        b.iter(|| hasher.hash(black_box(&password)).unwrap());
    });
    group.bench_function("verify_default_params", |b| {
        b.iter(|| hasher.verify(black_box(&password), &hash));
    });

    group.finish();
}

criterion_group!(benches, bench_token_issue_and_validate, bench_password_hashing);
criterion_main!(benches);
