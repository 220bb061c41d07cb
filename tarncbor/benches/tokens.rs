use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tarncbor::Decoder;

fn encode_unsigned(value: u64, out: &mut Vec<u8>) {
    match value {
        0..=23 => out.push(value as u8),
        24..=0xff => {
            out.push(0x18);
            out.push(value as u8);
        }
        0x100..=0xffff => {
            out.push(0x19);
            out.extend_from_slice(&(value as u16).to_be_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0x1a);
            out.extend_from_slice(&(value as u32).to_be_bytes());
        }
        _ => {
            out.push(0x1b);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
}

/// A flat, well-formed stream mixing the token kinds an expression body
/// actually produces. Seeded for determinism across runs.
fn token_soup(count: usize) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let mut out = Vec::new();
    for _ in 0..count {
        match rng.random_range(0..5) {
            0 => encode_unsigned(rng.random_range(0..=u64::MAX), &mut out),
            1 => {
                out.push(0xfb);
                out.extend_from_slice(&rng.random::<f64>().to_be_bytes());
            }
            2 => {
                // "field-name": ten bytes of text.
                out.push(0x6a);
                out.extend_from_slice(b"field-name");
            }
            3 => out.push(if rng.random_bool(0.5) { 0xf5 } else { 0xf4 }),
            _ => {
                out.push(0xf9);
                out.extend_from_slice(&[0x3c, 0x00]);
            }
        }
    }
    out
}

fn bench_tokens(c: &mut Criterion) {
    let bytes = token_soup(4096);

    c.bench_function("decode_token_soup", |b| {
        b.iter(|| {
            let mut decoder = Decoder::from_bytes(black_box(&bytes));
            let mut decoded = 0usize;
            while let Ok(token) = decoder.next_token() {
                black_box(&token);
                decoded += 1;
            }
            decoded
        })
    });
}

criterion_group!(benches, bench_tokens);
criterion_main!(benches);
