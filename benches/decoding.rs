use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use exfor::dataset::{extract_batch, extract_datasets, extract_request, ExtractConfig};
use exfor::reaction::Measurement;
use exfor::record::Entry;

const SMITH: &str = include_str!("../tests/fixtures/12898.x4");
const HATANAKA: &str = include_str!("../tests/fixtures/E0783.x4");

const REACTIONS: &[&str] = &[
    "(23-V-51(N,P)22-TI-51,,SIG)",
    "(1-H-1(D,EL)1-H-1,,POL/DA,,VAP)",
    "((23-V-51(N,P)22-TI-51,,SIG)/(92-U-238(N,F),,SIG))",
    "(48-CD-116(N,2N)48-CD-115-M/G,,SIG/RAT)",
    "((98-CF-252(0,F),,NU)//(92-U-235(N,F),,NU))",
];

/// A request of `copies` entries, each with a distinct accession number
fn synthetic_request(copies: usize) -> String {
    let mut request = String::from("REQUEST          00001\n");
    for i in 0..copies {
        let accnum = format!("{:05}", 20000 + i);
        request.push_str(&SMITH.replace("12898", &accnum));
    }
    request.push_str(&format!("ENDREQUEST{copies:>12}\n"));
    request
}

/// Benchmark tokenizing entries into the record model
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for (name, text) in [("12898", SMITH), ("E0783", HATANAKA)] {
        let lines: Vec<&str> = text.lines().collect();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &lines, |b, lines| {
            b.iter(|| black_box(Entry::from_lines(lines).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark parsing reaction strings
fn bench_reaction_parsing(c: &mut Criterion) {
    c.bench_function("reaction_parsing", |b| {
        b.iter(|| {
            for text in REACTIONS {
                black_box(Measurement::parse(black_box(text)).unwrap());
            }
        });
    });
}

/// Benchmark dataset extraction with and without simplification
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let lines: Vec<&str> = SMITH.lines().collect();
    let entry = Entry::from_lines(&lines).unwrap();

    let configs = [
        ("raw", ExtractConfig::default()),
        ("simplified", ExtractConfig::default().with_simplify(true)),
        (
            "all_columns",
            ExtractConfig::default()
                .with_simplify(true)
                .with_make_all_columns(true),
        ),
    ];
    for (name, config) in &configs {
        group.bench_with_input(BenchmarkId::from_parameter(name), config, |b, config| {
            b.iter(|| black_box(extract_datasets(&entry, config)));
        });
    }

    group.finish();
}

/// Benchmark whole requests, from text to simplified datasets
fn bench_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");
    let config = ExtractConfig::default().with_simplify(true);

    for copies in [10, 100, 500] {
        let request = synthetic_request(copies);
        let lines: Vec<&str> = request.lines().collect();
        group.throughput(Throughput::Elements(copies as u64));

        group.bench_with_input(BenchmarkId::new("text", copies), &lines, |b, lines| {
            b.iter(|| black_box(extract_request(lines, &config)));
        });

        let entries: Vec<Entry> = exfor::record::split_request(&lines)
            .iter()
            .map(|block| Entry::from_lines(block).unwrap())
            .collect();
        group.bench_with_input(BenchmarkId::new("batch", copies), &entries, |b, entries| {
            b.iter(|| black_box(extract_batch(entries, &config)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_reaction_parsing,
    bench_extraction,
    bench_request
);
criterion_main!(benches);
