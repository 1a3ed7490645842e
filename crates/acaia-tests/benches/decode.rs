use acaia_decoder::{FrameAssembler, ScaleSession, decode_events};
use acaia_encoder::encode_message;
use acaia_types::MessageType;
use acaia_wire::ChecksumVariant;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// A stream of `n` weight notifications, as a scale sends them at 10 Hz.
fn weight_stream(n: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..n {
        let [d0, d1, d2, _] = (i * 7).to_le_bytes();
        let payload = [0x05, d0, d1, d2, 0, 2, u8::from(i % 5 != 0)];
        out.extend(encode_message(MessageType::Event, &payload, ChecksumVariant::Split).unwrap());
    }
    out
}

fn bench_decode_events(c: &mut Criterion) {
    let payload = [
        0x05, 0xE8, 0x03, 0, 0, 2, 0, // weight
        0x06, 64, // battery
        0x07, 1, 30, 5, // timer
        0x08, 0x0A, // key
    ];

    c.bench_function("decode_events_mixed", |b| {
        b.iter(|| decode_events(&payload));
    });
}

fn bench_session_chunked(c: &mut Criterion) {
    let stream = weight_stream(1_000);
    let mut group = c.benchmark_group("session_chunked");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    // 20 bytes is the default BLE notification size.
    for chunk in [1usize, 20, 244, stream.len()] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut session = ScaleSession::new();
                let mut events = 0;
                for piece in stream.chunks(chunk) {
                    events += session.on_bytes(piece).len();
                }
                events
            });
        });
    }

    group.finish();
}

fn bench_assembler_noise(c: &mut Criterion) {
    let mut stream = Vec::new();
    for (i, packet) in weight_stream(200).chunks(13).enumerate() {
        stream.extend(std::iter::repeat_n(0x42u8, i % 17));
        stream.extend_from_slice(packet);
    }

    let mut group = c.benchmark_group("assembler");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("noisy_stream", |b| {
        b.iter(|| FrameAssembler::new().feed(&stream).len());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decode_events,
    bench_session_chunked,
    bench_assembler_noise
);
criterion_main!(benches);
