use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tetrion::core::{
    CollisionDetector, CollisionStrategy, Piece, Playfield, PlayfieldEngine,
};
use tetrion::input::InputTimingController;
use tetrion::types::PieceKind;

fn bench_frame(c: &mut Criterion) {
    let mut engine = PlayfieldEngine::new(12345);
    let mut controller = InputTimingController::new();

    c.bench_function("controller_frame_16ms", |b| {
        b.iter(|| {
            controller.frame(&mut engine, black_box(16.0));
            if engine.game_over() {
                engine.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_full_rows", |b| {
        b.iter(|| {
            let mut field = Playfield::new();
            for y in 16..20 {
                for x in 0..10 {
                    field.set_cell(x, y, 1);
                }
            }
            black_box(field.clear_full_rows())
        })
    });
}

fn bench_collision_strategies(c: &mut Criterion) {
    let mut field = Playfield::new();
    for x in 0..10 {
        field.set_cell(x, 19, 1);
    }
    let piece = Piece::spawn(PieceKind::T);

    for (name, strategy) in [
        ("collision_rowwise", CollisionStrategy::Rowwise),
        ("collision_packed", CollisionStrategy::Packed),
    ] {
        let detector = CollisionDetector::with_strategy(strategy);
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut hits = 0u32;
                for y in -2..20 {
                    let probe = Piece {
                        y,
                        ..piece
                    };
                    if detector.collides(&field, black_box(&probe)) {
                        hits += 1;
                    }
                }
                hits
            })
        });
    }
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = PlayfieldEngine::new(777);

    c.bench_function("hard_drop_and_spawn", |b| {
        b.iter(|| {
            engine.hard_drop();
            if engine.game_over() {
                engine.reset();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_collision_strategies,
    bench_hard_drop
);
criterion_main!(benches);
