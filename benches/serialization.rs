use canonical_extjson::{
    doc, to_string, Binary, Bson, CodeWithScope, DateTime, Decimal128, Document, ObjectId,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn user(i: i32) -> Document {
    let mut d = doc!({
        "name": "Alice",
        "email": "alice@example.com",
        "active": true,
        "score": 97.25
    });
    d.insert("_id", ObjectId::from_bytes([i as u8; 12]));
    d.insert("age", i);
    d.insert("created", DateTime::from_millis(1_590_972_160_292 + i64::from(i)));
    d
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let d = user(1);
    c.bench_function("serialize_simple_document", |b| {
        b.iter(|| to_string(black_box(&d)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let users: Vec<Bson> = (0..*size).map(|i| Bson::Document(user(i))).collect();
        let d = doc!({ "users": users });

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&d)))
        });
    }
    group.finish();
}

fn benchmark_serialize_numbers(c: &mut Criterion) {
    let values: Vec<Bson> = (0..1000)
        .map(|i| match i % 4 {
            0 => Bson::Double(f64::from(i) / 7.0),
            1 => Bson::Int64(i64::from(i) * 1_000_003),
            2 => Bson::Decimal128(Decimal128::from_parts(false, i as u128 * 11, -3).unwrap()),
            _ => Bson::Int32(i),
        })
        .collect();
    let d = doc!({ "values": values });

    c.bench_function("serialize_numbers", |b| b.iter(|| to_string(black_box(&d))));
}

fn benchmark_serialize_strings(c: &mut Criterion) {
    let text = "line one\nline \"two\"\ttabbed\u{1} ".repeat(64);
    let mut d = Document::new();
    d.insert("text", text.as_str());
    d.insert(
        "blob",
        Binary {
            subtype: 0,
            bytes: text.as_bytes().to_vec(),
        },
    );
    d.insert(
        "code",
        CodeWithScope {
            code: text.clone(),
            scope: doc!({ "x": 1 }),
        },
    );

    c.bench_function("serialize_strings", |b| b.iter(|| to_string(black_box(&d))));
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_serialize_array,
    benchmark_serialize_numbers,
    benchmark_serialize_strings
);
criterion_main!(benches);
