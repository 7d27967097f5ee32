use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use record_codec::{
    decode, encode, encode_with_options, to_record, EncodeOptions, FieldMap, Format, Record,
    Schema,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    quantity: u32,
    discount: u32,
}

#[derive(Serialize, Clone)]
struct Catalog {
    products: Vec<Product>,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn schema() -> Schema {
    Schema::new()
        .with(
            "User",
            FieldMap::new()
                .tag("email", ",omitempty")
                .unwrap()
                .tag("active", "is_active,omitempty")
                .unwrap(),
        )
        .with(
            "Product",
            FieldMap::new()
                .tag("discount", ",omitempty")
                .unwrap(),
        )
        .with("Catalog", FieldMap::new().tag("products", "product").unwrap())
}

fn user_record() -> Record {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };
    to_record(&user, &schema()).unwrap()
}

fn catalog_record(size: u32) -> Record {
    let products = (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            quantity: i,
            discount: i % 3,
        })
        .collect();
    to_record(&Catalog { products }, &schema()).unwrap()
}

fn nested_record() -> Record {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };
    to_record(&data, &Schema::new()).unwrap()
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let record = user_record();
    let mut group = c.benchmark_group("encode_simple");

    group.bench_function("json", |b| {
        b.iter(|| encode(black_box(&record), Format::Json))
    });
    group.bench_function("xml", |b| b.iter(|| encode(black_box(&record), Format::Xml)));

    group.finish();
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let record = user_record();
    let json = encode(&record, Format::Json).unwrap().into_string();
    let xml = encode(&record, Format::Xml).unwrap().into_string();
    let mut group = c.benchmark_group("decode_simple");

    group.bench_function("json", |b| {
        b.iter(|| decode(black_box(&json), Format::Json, &record))
    });
    group.bench_function("xml", |b| {
        b.iter(|| decode(black_box(&xml), Format::Xml, &record))
    });

    group.finish();
}

fn benchmark_encode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_array");

    for size in [10, 50, 100, 500].iter() {
        let record = catalog_record(*size);

        group.bench_with_input(BenchmarkId::new("json", size), &record, |b, record| {
            b.iter(|| encode(black_box(record), Format::Json))
        });
        group.bench_with_input(BenchmarkId::new("xml", size), &record, |b, record| {
            b.iter(|| encode(black_box(record), Format::Xml))
        });
    }
    group.finish();
}

fn benchmark_decode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");

    for size in [10, 50, 100, 500].iter() {
        let record = catalog_record(*size);
        let json = encode(&record, Format::Json).unwrap().into_string();
        let xml = encode(&record, Format::Xml).unwrap().into_string();

        group.bench_with_input(BenchmarkId::new("json", size), &json, |b, json| {
            b.iter(|| decode(black_box(json), Format::Json, &record))
        });
        group.bench_with_input(BenchmarkId::new("xml", size), &xml, |b, xml| {
            b.iter(|| decode(black_box(xml), Format::Xml, &record))
        });
    }
    group.finish();
}

fn benchmark_encode_nested(c: &mut Criterion) {
    let record = nested_record();
    let pretty = EncodeOptions::pretty();
    let mut group = c.benchmark_group("encode_nested");

    group.bench_function("json_compact", |b| {
        b.iter(|| encode(black_box(&record), Format::Json))
    });
    group.bench_function("json_pretty", |b| {
        b.iter(|| encode_with_options(black_box(&record), Format::Json, &pretty))
    });
    group.bench_function("xml_pretty", |b| {
        b.iter(|| encode_with_options(black_box(&record), Format::Xml, &pretty))
    });

    group.finish();
}

fn benchmark_to_record(c: &mut Criterion) {
    let products: Vec<Product> = (0..100)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            quantity: i,
            discount: 0,
        })
        .collect();
    let catalog = Catalog { products };
    let schema = schema();

    c.bench_function("to_record_100", |b| {
        b.iter(|| to_record(black_box(&catalog), &schema))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };
    let record = user_record();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("record_encode", |b| {
        b.iter(|| encode(black_box(&record), Format::Json))
    });

    group.bench_function("serde_json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    group.bench_function("record_serialize_via_serde_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&record)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_encode_array,
    benchmark_decode_array,
    benchmark_encode_nested,
    benchmark_to_record,
    benchmark_comparison_with_json
);
criterion_main!(benches);
