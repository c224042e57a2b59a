//! Criterion benchmarks for benc
//!
//! Run with: cargo bench

use std::collections::BTreeMap;

use benc::{
    marshal_int, marshal_map, marshal_slice, marshal_string, marshal_uint, size_int, size_map,
    size_slice, size_string, size_uint, skip_map, skip_slice, skip_string, skip_uint,
    unmarshal_int, unmarshal_map, unmarshal_slice, unmarshal_string, unmarshal_string_view,
    unmarshal_uint, Reader,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_varint(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint");
    let mut buf = [0u8; 10];

    for value in [1u64, 300, 1 << 35, u64::MAX] {
        let n = marshal_uint(&mut buf, 0, value).unwrap();
        let frame = buf[..n].to_vec();

        group.bench_with_input(BenchmarkId::new("encode", value), &value, |b, &v| {
            b.iter(|| black_box(marshal_uint(black_box(&mut buf), 0, black_box(v)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", value), &frame, |b, frame| {
            b.iter(|| black_box(unmarshal_uint(black_box(frame), 0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("skip", value), &frame, |b, frame| {
            b.iter(|| black_box(skip_uint(black_box(frame), 0).unwrap()));
        });
    }

    group.bench_function("zigzag_roundtrip", |b| {
        b.iter(|| {
            let n = marshal_int(black_box(&mut buf), 0, black_box(-123_456_789)).unwrap();
            black_box(unmarshal_int(&buf[..n], 0).unwrap());
        });
    });

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("string");

    for len in [8usize, 256, 4096] {
        let s = "x".repeat(len);
        let size = size_string(&s);
        let frame = benc::marshal(size, |buf, n| marshal_string(buf, n, &s)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        let mut buf = vec![0u8; size];
        group.bench_with_input(BenchmarkId::new("encode", len), &s, |b, s| {
            b.iter(|| black_box(marshal_string(black_box(&mut buf), 0, s).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode_copy", len), &frame, |b, frame| {
            b.iter(|| black_box(unmarshal_string(black_box(frame), 0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode_view", len), &frame, |b, frame| {
            b.iter(|| black_box(unmarshal_string_view(black_box(frame), 0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("skip", len), &frame, |b, frame| {
            b.iter(|| black_box(skip_string(black_box(frame), 0).unwrap()));
        });
    }

    group.finish();
}

fn bench_containers(c: &mut Criterion) {
    let mut group = c.benchmark_group("container");

    let ids: Vec<i64> = (0..1000).map(|i| i * 7919 - 500_000).collect();
    let ids_size = size_slice(&ids, |v| size_int(*v));
    let ids_frame = benc::marshal(ids_size, |buf, n| {
        marshal_slice(buf, n, &ids, |b, n, v| marshal_int(b, n, *v))
    })
    .unwrap();
    group.throughput(Throughput::Bytes(ids_size as u64));

    group.bench_function("slice_encode_1000", |b| {
        b.iter(|| {
            let data = benc::marshal(ids_size, |buf, n| {
                marshal_slice(buf, n, black_box(&ids), |b, n, v| marshal_int(b, n, *v))
            })
            .unwrap();
            black_box(data);
        });
    });
    group.bench_function("slice_decode_1000", |b| {
        b.iter(|| black_box(unmarshal_slice(black_box(&ids_frame), 0, unmarshal_int).unwrap()));
    });
    group.bench_function("slice_skip_1000", |b| {
        b.iter(|| black_box(skip_slice(black_box(&ids_frame), 0, skip_uint).unwrap()));
    });

    let counts: BTreeMap<String, u64> = (0..200).map(|i| (format!("key-{i:04}"), i * 31)).collect();
    let counts_size = size_map(&counts, |k| size_string(k), |v| size_uint(*v));
    let counts_frame = benc::marshal(counts_size, |buf, n| {
        marshal_map(
            buf,
            n,
            &counts,
            |b, n, k| marshal_string(b, n, k),
            |b, n, v| marshal_uint(b, n, *v),
        )
    })
    .unwrap();
    group.throughput(Throughput::Bytes(counts_size as u64));

    group.bench_function("map_decode_200", |b| {
        b.iter(|| {
            let (map, n): (BTreeMap<&str, u64>, usize) =
                unmarshal_map(black_box(&counts_frame), 0, unmarshal_string_view, unmarshal_uint)
                    .unwrap();
            black_box((map, n));
        });
    });
    group.bench_function("map_skip_200", |b| {
        b.iter(|| black_box(skip_map(black_box(&counts_frame), 0, skip_string, skip_uint).unwrap()));
    });

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let record: (u64, String, Vec<Option<String>>) = (
        42,
        "account-7".to_string(),
        vec![Some("alpha".to_string()), None, Some("gamma".to_string())],
    );
    let data = benc::encode(&record.2).unwrap();
    let mut frame = benc::encode(&benc::VarUint(record.0)).unwrap();
    frame.extend(benc::encode(&record.1).unwrap());
    frame.extend(data);

    c.bench_function("reader_record_decode", |b| {
        b.iter(|| {
            let mut reader = Reader::new(black_box(&frame));
            let id = reader.read_uint().unwrap();
            let name = reader.read_str().unwrap();
            let tags: Vec<Option<&str>> = reader.read().unwrap();
            black_box((id, name, tags));
        });
    });

    c.bench_function("reader_record_skip", |b| {
        b.iter(|| {
            let mut reader = Reader::new(black_box(&frame));
            reader.skip_uint().unwrap();
            reader.skip_string().unwrap();
            reader.skip::<Vec<Option<String>>>().unwrap();
            black_box(reader.position());
        });
    });
}

criterion_group!(
    benches,
    bench_varint,
    bench_strings,
    bench_containers,
    bench_reader
);
criterion_main!(benches);
