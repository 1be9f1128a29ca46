use criterion::{Criterion, black_box, criterion_group, criterion_main};
use waveshare_epd_core::{Command, frame};

fn bench_encode(c: &mut Criterion) {
    let empty: &[u8] = &[];
    c.bench_function("encode handshake", |b| {
        b.iter(|| frame::encode(black_box(0x00), black_box(empty)))
    });

    let text = Command::display_text(10, 10, vec![b'A'; 256]).unwrap();
    c.bench_function("encode 256 byte text", |b| b.iter(|| black_box(&text).encode()));

    let payload = vec![0x5A; 60_000];
    c.bench_function("encode 60k payload", |b| {
        b.iter(|| frame::encode(black_box(0x30), black_box(&payload)))
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
