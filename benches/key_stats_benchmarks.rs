use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kbmirror::engine::KeyboardState;
use kbmirror::engine::key_stats::KeyPressCounter;
use kbmirror::keyboard::code::KeyInput;
use kbmirror::keyboard::layout::KeyboardLayout;

fn all_codes() -> Vec<&'static str> {
    KeyboardLayout::ansi().keys().map(|k| k.code).collect()
}

fn bench_record(c: &mut Criterion) {
    let codes = all_codes();

    c.bench_function("counter record (1000 presses)", |b| {
        b.iter(|| {
            let mut counter = KeyPressCounter::default();
            for i in 0..1000 {
                counter.record(black_box(codes[i % codes.len()]));
            }
            counter
        })
    });
}

fn bench_sorted(c: &mut Criterion) {
    let codes = all_codes();
    let mut counter = KeyPressCounter::default();
    for (i, code) in codes.iter().enumerate() {
        for _ in 0..(i % 17) + 1 {
            counter.record(code);
        }
    }

    c.bench_function("counter sorted (full keyboard)", |b| {
        b.iter(|| black_box(&counter).sorted().len())
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let inputs: Vec<KeyInput> = KeyboardLayout::ansi()
        .keys()
        .map(|k| KeyInput::new(k.code, k.key))
        .collect();

    c.bench_function("key_down + key_up (full keyboard)", |b| {
        b.iter(|| {
            let mut state = KeyboardState::new(KeyboardLayout::ansi(), &[]);
            for input in &inputs {
                state.key_down(black_box(input));
            }
            for input in &inputs {
                state.key_up(black_box(input));
            }
            state.counter.total()
        })
    });
}

criterion_group!(benches, bench_record, bench_sorted, bench_pipeline);
criterion_main!(benches);
